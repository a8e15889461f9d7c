mod patch_decoder;
mod reconciler;

pub use patch_decoder::PatchVersionDecoder;
pub use reconciler::ReconciliationEngine;
