//! AviUtl `.exo` project generation.
//!
//! Templates under the assets directory carry `__TITLE__` and `__CREDITS__`
//! tokens inside their text objects. AviUtl stores text as UTF-16LE hex
//! zero-padded to a fixed field width, and reads the whole file as
//! Shift-JIS, so templates are decoded, substituted, and re-encoded here.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::SHIFT_JIS;
use tracing::info;

use crate::error::{Error, Result};

const TITLE_TOKEN: &str = "__TITLE__";
const CREDITS_TOKEN: &str = "__CREDITS__";

/// Width of an AviUtl text field: 1024 UTF-16 units as hex digits.
const TEXT_FIELD_HEX_LEN: usize = 4096;

const EXO_EXTENSION: &str = "exo";

/// Credit block shown under the song title.
///
/// Label layout matches the overlay's text objects: full-width colons,
/// ideographic-space padding, CRLF between the two lines.
pub fn format_credits(composer: &str, vocalist: &str, author: &str) -> String {
    format!("作詞：ー　　作曲：{composer}　　編曲：ー\r\nVo：{vocalist}　　譜面作成：{author}")
}

/// Instantiate every `.exo` template from `assets_dir` into `out_dir`.
///
/// Returns the written paths. No templates at all is a packaging defect
/// ([`Error::MissingAsset`]), not a silently-skipped step.
pub fn write_exo_files(
    assets_dir: &Path,
    out_dir: &Path,
    title: &str,
    credits: &str,
) -> Result<Vec<PathBuf>> {
    let mut templates: Vec<PathBuf> = fs::read_dir(assets_dir)
        .map_err(|_| Error::MissingAsset(assets_dir.to_path_buf()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(EXO_EXTENSION))
        })
        .collect();
    templates.sort();
    if templates.is_empty() {
        return Err(Error::MissingAsset(assets_dir.join("*.exo")));
    }

    fs::create_dir_all(out_dir).map_err(|source| Error::Encode {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let title_hex = encode_text_field(title);
    let credits_hex = encode_text_field(credits);

    let mut written = Vec::with_capacity(templates.len());
    for template in templates {
        let Some(file_name) = template.file_name() else {
            continue;
        };
        let raw = fs::read(&template).map_err(|_| Error::MissingAsset(template.clone()))?;
        let (text, _, _) = SHIFT_JIS.decode(&raw);
        let filled = text
            .replace(TITLE_TOKEN, &title_hex)
            .replace(CREDITS_TOKEN, &credits_hex);
        let (encoded, _, _) = SHIFT_JIS.encode(&filled);

        let out_path = out_dir.join(file_name);
        fs::write(&out_path, &encoded).map_err(|source| Error::Encode {
            path: out_path.clone(),
            source,
        })?;
        info!("Wrote {}", out_path.display());
        written.push(out_path);
    }
    Ok(written)
}

/// Encode text the way AviUtl stores it: UTF-16LE hex, zero-padded to the
/// fixed field width. Overlong input is truncated at the field boundary.
fn encode_text_field(text: &str) -> String {
    let mut hex = String::with_capacity(TEXT_FIELD_HEX_LEN);
    for unit in text.encode_utf16() {
        if hex.len() + 4 > TEXT_FIELD_HEX_LEN {
            break;
        }
        for byte in unit.to_le_bytes() {
            let _ = write!(hex, "{byte:02x}");
        }
    }
    while hex.len() < TEXT_FIELD_HEX_LEN {
        hex.push('0');
    }
    hex
}
