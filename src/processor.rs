use crate::cue::Cue;

/// Drops every cue that repeats the text of the cue kept right before it.
/// The first cue of a run keeps its timestamps; repeats separated by other
/// text are left alone.
pub fn collapse_repeats(mut cues: Vec<Cue>) -> Vec<Cue> {
    cues.dedup_by(|cur, prev| cur.subtitle == prev.subtitle);
    cues
}
