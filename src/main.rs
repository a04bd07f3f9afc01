use std::process::ExitCode;

use nowplaying_icons::config::load_config;
use nowplaying_icons::logger::{self, log_error, log_line};
use nowplaying_icons::{IconSetBuilder, Iconutil};

fn main() -> ExitCode {
    let config_arg = std::env::args().nth(1);
    let config = match load_config(config_arg.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log_error("config", &e);
            return ExitCode::FAILURE;
        }
    };
    logger::init(config.log_file.clone());

    log_line("Generating NowPlaying icons...");
    let compiler = Iconutil::new(config.compiler_program.clone());
    let builder = IconSetBuilder::new(config);

    match builder.run(&compiler) {
        Ok(report) => {
            log_line(&format!(
                "{} app icons in {}",
                report.app_icons.len(),
                builder.config().app_icon_dir.display()
            ));
            log_line(&format!(
                "{} DMG icons in {}",
                report.dmg_icons.len(),
                builder.config().dmg_dir.display()
            ));
            log_line(&format!("Volume icon: {}", report.volume_icon.display()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error("icon build failed", &e);
            ExitCode::FAILURE
        }
    }
}
