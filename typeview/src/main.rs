//! Render a string with a font file from the command line.
//!
//! Prints a BMP data URI to stdout, or writes the decoded BMP bytes to
//! a file with `-o`. Useful for eyeballing rasterizer output without a
//! browser harness.

use std::fmt::Display;
use std::path::PathBuf;

use rastype::{FontReader, Options};

fn main() -> Result<(), Error> {
    let args = flags::Args::from_env().map_err(|e| Error(e.to_string()))?;
    let bytes = std::fs::read(&args.font).map_err(|e| Error(format!("read font: {e}")))?;

    let options = Options {
        vertical: args.vertical,
        debug_edges: args.edges,
        collection_index: args.index.unwrap_or(0),
        ..Options::default()
    };
    let mut reader = FontReader::with_options(&bytes, options);

    let size = args.size.unwrap_or(32.0);
    let width = args.width.unwrap_or(512);
    let height = args.height.unwrap_or(64);
    let colors = parse_colors(args.colors.as_deref())?;
    let text: Vec<u16> = args.text.encode_utf16().collect();

    if args.measure {
        let widths = reader.measure(&text, size);
        if widths.is_empty() {
            return Err(Error("failed to open font".into()));
        }
        for width in widths {
            println!("{width}");
        }
        return Ok(());
    }

    let uri = reader.get_bitmap(&text, size, width, height, &colors);
    if uri.is_empty() {
        return Err(Error("failed to render (bad font or unsupported palette)".into()));
    }
    match &args.output {
        Some(path) => write_bmp(path, &uri)?,
        None => println!("{uri}"),
    }
    Ok(())
}

/// Colors come in as a comma-separated list of RGB hex values.
fn parse_colors(arg: Option<&str>) -> Result<Vec<u32>, Error> {
    let Some(arg) = arg else {
        return Ok(vec![0xffffff, 0x000000]);
    };
    arg.split(',')
        .map(|color| {
            u32::from_str_radix(color.trim().trim_start_matches('#'), 16)
                .map_err(|_| Error(format!("bad color {color:?}")))
        })
        .collect()
}

fn write_bmp(path: &PathBuf, uri: &str) -> Result<(), Error> {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    let encoded = uri
        .strip_prefix("data:image/bmp;base64,")
        .ok_or_else(|| Error("unexpected data URI prefix".into()))?;
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error(format!("decode data URI: {e}")))?;
    std::fs::write(path, bytes).map_err(|e| Error(format!("write {}: {e}", path.display())))
}

struct Error(String);

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Rasterize text with a TrueType font
        cmd args {
            required font: PathBuf
            required text: String
                optional -s, --size size: f64
                optional -w, --width width: usize
                optional -h, --height height: usize
                optional -c, --colors colors: String
                optional -i, --index index: u32
                optional -o, --output output: PathBuf
                optional -m, --measure
                optional -v, --vertical
                optional -e, --edges
            }
    }
}
