use crate::reconciliation::domain::RawVersionSet;
use crate::shared::error::ReleaseError;

/// PatchVersionDecoder turns patch-log identifiers into dotted versions
///
/// Patch identifiers look like `pcr-000163330_stu8170002`: after the `_`
/// comes the product's patch key, then a one-character major version and
/// two-character segments with a leading zero (`8` `17` `00` `02` →
/// `8.17.0.2`).
pub struct PatchVersionDecoder;

impl PatchVersionDecoder {
    /// Decodes one raw patch identifier.
    ///
    /// The patch key is removed at its first occurrence anywhere in the
    /// second `_`-separated segment, not only as a prefix. A trailing
    /// unpaired character is dropped.
    ///
    /// # Errors
    /// `MalformedPatchId` when there is no `_` delimiter or nothing is left
    /// after removing the patch key.
    pub fn decode(raw_patch_id: &str, patch_key: &str) -> Result<String, ReleaseError> {
        let segment = raw_patch_id
            .split('_')
            .nth(1)
            .ok_or_else(|| ReleaseError::MalformedPatchId {
                raw: raw_patch_id.to_string(),
                reason: "missing '_' delimiter".to_string(),
            })?;

        let remainder = segment.replacen(patch_key, "", 1);
        let mut chars = remainder.chars();
        let major = chars.next().ok_or_else(|| ReleaseError::MalformedPatchId {
            raw: raw_patch_id.to_string(),
            reason: format!("no version digits after patch key '{}'", patch_key),
        })?;

        let mut version = major.to_string();
        let revision: Vec<char> = chars.collect();
        for pair in revision.chunks_exact(2) {
            version.push('.');
            if pair[0] != '0' {
                version.push(pair[0]);
            }
            version.push(pair[1]);
        }

        Ok(version)
    }

    /// Decodes every identifier of a patch-log result set
    pub fn decode_all(raw: &RawVersionSet, patch_key: &str) -> Result<RawVersionSet, ReleaseError> {
        raw.iter()
            .map(|patch_id| Self::decode(patch_id, patch_key))
            .collect::<Result<Vec<_>, _>>()
            .map(RawVersionSet::new)
    }
}
