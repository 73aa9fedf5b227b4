//! `roomview [MODEL] [OPTIONS.toml]`
//!
//! Opens a window showing a glTF/GLB room model. `MODEL` may be a local
//! path or an http(s) URL; URLs are downloaded into `assets/models/` first.
//! Without arguments the model path from the default options is used.

use std::path::{Path, PathBuf};

use roomview::{Options, Viewer};

/// Largest model the binary will download.
const MAX_DOWNLOAD_BYTES: u64 = 256 * 1024 * 1024;

/// File name a downloaded model is stored under in `assets/models/`.
fn download_file_name(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|name| {
            let lower = name.to_ascii_lowercase();
            lower.ends_with(".glb") || lower.ends_with(".gltf")
        })
        .map_or_else(|| "download.glb".to_owned(), str::to_owned)
}

fn resolve_model_path(input: &str) -> Result<PathBuf, String> {
    if !(input.starts_with("http://") || input.starts_with("https://")) {
        return Ok(PathBuf::from(input));
    }

    let models_dir = Path::new("assets/models");
    let local_path = models_dir.join(download_file_name(input));
    if local_path.exists() {
        log::info!("using cached {}", local_path.display());
        return Ok(local_path);
    }

    std::fs::create_dir_all(models_dir)
        .map_err(|e| format!("Failed to create models directory: {e}"))?;

    log::info!("Downloading {input}...");
    let bytes = ureq::get(input)
        .call()
        .map_err(|e| format!("Failed to download {input}: {e}"))?
        .into_body()
        .with_config()
        .limit(MAX_DOWNLOAD_BYTES)
        .read_to_vec()
        .map_err(|e| format!("Failed to read response: {e}"))?;

    std::fs::write(&local_path, &bytes)
        .map_err(|e| format!("Failed to save model: {e}"))?;

    log::info!("Downloaded {} bytes to {}", bytes.len(), local_path.display());
    Ok(local_path)
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let model_arg = args.next();
    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("Failed to load options from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let input = model_arg.unwrap_or_else(|| options.scene.model_path.clone());
    let model_path = match resolve_model_path(&input) {
        Ok(path) => path,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let result = Viewer::builder()
        .with_path(model_path.to_string_lossy())
        .with_options(options)
        .build()
        .run();

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_name_comes_from_url() {
        assert_eq!(
            download_file_name("https://example.com/rooms/rooms_2.glb?v=3"),
            "rooms_2.glb"
        );
        assert_eq!(
            download_file_name("https://example.com/model"),
            "download.glb"
        );
    }

    #[test]
    fn local_paths_pass_through() {
        assert_eq!(
            resolve_model_path("assets/models/rooms_2.glb").unwrap(),
            PathBuf::from("assets/models/rooms_2.glb")
        );
    }
}
