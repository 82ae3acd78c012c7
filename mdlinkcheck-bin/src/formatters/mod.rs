pub(crate) mod color;
pub(crate) mod log;

use mdlinkcheck_lib::LinkStatus;

/// Glyph printed in front of a link with the given status
pub(crate) const fn glyph(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Alive => "✓",
        LinkStatus::Dead => "✖",
        LinkStatus::Ignored => "/",
        LinkStatus::Error => "⚠",
    }
}
