use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use nowplaying_icons::logger::{log_error, log_line};
use nowplaying_icons::{IconError, RenderRequest, Variant, render_png};

// genicon [size] [standard|cutout] [out.png]
fn main() -> ExitCode {
    match run() {
        Ok(out) => {
            log_line(&format!("Wrote {}", out.display()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error("genicon", &e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<PathBuf, IconError> {
    let mut args = std::env::args().skip(1);
    let size = match args.next() {
        Some(s) => s
            .parse::<u32>()
            .map_err(|_| IconError::InvalidArgument(format!("size must be a positive integer, got '{}'", s)))?,
        None => 1024,
    };
    let variant = match args.next() {
        Some(v) => Variant::parse(&v)
            .ok_or_else(|| IconError::InvalidArgument(format!("unknown variant '{}'", v)))?,
        None => Variant::Standard,
    };
    let out = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("icon_{}_{}.png", variant.as_str(), size)));

    let png = render_png(&RenderRequest::new(size, variant)?)?;
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| IconError::io(dir, e))?;
    }
    fs::write(&out, png).map_err(|e| IconError::io(&out, e))?;
    Ok(out)
}
