//! Two-phase WAD acquisition.

use crate::platform::PlatformHost;

/// Fallback archive substituted when the host supplies no WADs: a minimal,
/// structurally valid IWAD. Layout: the magic `IWAD`, a little-endian lump
/// count of 0, and a little-endian directory offset pointing just past the
/// twelve-byte header.
pub const BUILTIN_IWAD: [u8; 12] = *b"IWAD\x00\x00\x00\x00\x0c\x00\x00\x00";

/// Archives acquired from the host, partitioned per the loading protocol:
/// the first entry is the base IWAD, the rest are patch PWADs in the order
/// the host supplied them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WadBundle {
    pub iwad: Vec<u8>,
    pub pwads: Vec<Vec<u8>>,
}

impl WadBundle {
    /// Runs the two-phase loading protocol against the host.
    ///
    /// A zero count substitutes [`BUILTIN_IWAD`]. A nonzero count negotiates
    /// a total byte size, copies every archive into one contiguous buffer,
    /// and partitions it by walking the per-archive length array. A host
    /// that reports sizes inconsistent with what it delivers has broken the
    /// loading contract; the violation is logged and the bundle comes back
    /// empty.
    pub fn acquire<H: PlatformHost>(host: &mut H) -> WadBundle {
        let (count, total_bytes) = host.wad_sizes();
        if count == 0 {
            return WadBundle {
                iwad: BUILTIN_IWAD.to_vec(),
                pwads: Vec::new(),
            };
        }
        if count < 0 || total_bytes < 0 {
            host.log_error(&format!(
                "wadSizes reported a negative shape ({count} WADs, {total_bytes} bytes); loading nothing"
            ));
            return WadBundle::default();
        }

        let mut data = vec![0u8; total_bytes as usize];
        let mut lengths = vec![0i32; count as usize];
        host.read_wads(&mut data, &mut lengths);

        match Self::partition(&data, &lengths) {
            Some(bundle) => bundle,
            None => {
                let delivered: i64 = lengths.iter().map(|&len| i64::from(len)).sum();
                host.log_error(&format!(
                    "readWads delivered an inconsistent layout: wadSizes promised {total_bytes} bytes across {count} WADs, per-WAD lengths sum to {delivered}; loading nothing"
                ));
                WadBundle::default()
            }
        }
    }

    /// Splits one contiguous buffer into per-archive blobs by accumulating
    /// offsets over the length array. Fails when any length is negative or
    /// the lengths do not cover the buffer exactly.
    fn partition(data: &[u8], lengths: &[i32]) -> Option<WadBundle> {
        let mut offset = 0usize;
        let mut blobs = Vec::with_capacity(lengths.len());
        for &length in lengths {
            if length < 0 {
                return None;
            }
            let end = offset.checked_add(length as usize)?;
            blobs.push(data.get(offset..end)?.to_vec());
            offset = end;
        }
        if offset != data.len() {
            return None;
        }
        let mut blobs = blobs.into_iter();
        Some(WadBundle {
            iwad: blobs.next()?,
            pwads: blobs.collect(),
        })
    }
}
