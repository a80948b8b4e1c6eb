//! Writer for the `data.ped` overlay descriptor.
//!
//! Line-oriented, pipe-delimited:
//!
//! ```text
//! ped|<format version>|<ap flag>|<total score>
//! a|<combo asset path>
//! s|<time>|<combo>|<running score>      (one per note)
//! ```
//!
//! Times carry four decimals; running scores are rounded half-up for
//! display. The `a` record points the overlay at the pre-built combo asset
//! variant matching the AP flag.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::score::{ScoreBreakdown, round_half_up};

pub const PED_FORMAT_VERSION: u32 = 1;

const AP_COMBO_ASSET: &str = "combo_ap.png";
const NORMAL_COMBO_ASSET: &str = "combo_normal.png";

/// Serialize a breakdown to `out_path`.
///
/// The referenced combo asset must exist under `assets_dir`; a missing file
/// is a packaging defect surfaced as [`Error::MissingAsset`] before anything
/// is written.
pub fn write_ped_file(
    breakdown: &ScoreBreakdown,
    assets_dir: &Path,
    ap_combo: bool,
    out_path: &Path,
) -> Result<()> {
    let asset_name = if ap_combo {
        AP_COMBO_ASSET
    } else {
        NORMAL_COMBO_ASSET
    };
    let asset = assets_dir.join(asset_name);
    if !asset.is_file() {
        return Err(Error::MissingAsset(asset));
    }

    let encode_err = |source: io::Error| Error::Encode {
        path: out_path.to_path_buf(),
        source,
    };

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent).map_err(encode_err)?;
    }
    let file = fs::File::create(out_path).map_err(encode_err)?;
    let mut writer = BufWriter::new(file);
    write_records(&mut writer, breakdown, &asset, ap_combo).map_err(encode_err)?;

    info!(
        "Wrote {} ({} records, total {})",
        out_path.display(),
        breakdown.entries.len(),
        breakdown.total
    );
    Ok(())
}

fn write_records<W: Write>(
    writer: &mut W,
    breakdown: &ScoreBreakdown,
    asset: &Path,
    ap_combo: bool,
) -> io::Result<()> {
    writeln!(
        writer,
        "ped|{}|{}|{}",
        PED_FORMAT_VERSION,
        u8::from(ap_combo),
        breakdown.total
    )?;
    writeln!(writer, "a|{}", asset.display())?;
    for entry in &breakdown.entries {
        writeln!(
            writer,
            "s|{:.4}|{}|{}",
            entry.time,
            entry.combo,
            round_half_up(entry.running_score)
        )?;
    }
    writer.flush()
}
