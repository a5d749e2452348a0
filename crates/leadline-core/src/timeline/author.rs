use super::context::ReconcileContext;

/// Resolve a display name for an entry.
///
/// Order: the first non-blank `names` candidate; else the viewer's name when
/// one of `author_ids` is the viewer's id; else the unknown-author label.
/// Never returns an empty string.
pub(crate) fn resolve_author<'a>(
    names: impl IntoIterator<Item = Option<&'a str>>,
    author_ids: impl IntoIterator<Item = Option<&'a str>>,
    ctx: &ReconcileContext<'_>,
) -> String {
    if let Some(name) = names.into_iter().flatten().map(str::trim).find(|n| !n.is_empty()) {
        return name.to_string();
    }

    if let Some(viewer) = ctx.viewer() {
        let viewer_id = viewer.id.trim();
        let viewer_name = viewer.name.trim();
        let is_viewer = !viewer_id.is_empty()
            && author_ids
                .into_iter()
                .flatten()
                .any(|id| id.trim() == viewer_id);
        if is_viewer && !viewer_name.is_empty() {
            return viewer_name.to_string();
        }
    }

    ctx.unknown_author().to_string()
}
