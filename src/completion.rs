//! Tracking which players still have to finish a part

use std::collections::HashSet;

use crate::models::Player;

/// Returns the names of the roster players without a completed drawing.
///
/// The result keeps the roster order. Names occurring multiple times in the
/// roster occur multiple times in the result as well. A player that never
/// submitted anything is just as incomplete as a player whose submissions
/// are all unfinished, only the names in `completed` count.
pub fn incomplete_players<S: AsRef<str>>(roster: &[Player], completed: &[S]) -> Vec<String> {
    let completed: HashSet<&str> = completed.iter().map(AsRef::as_ref).collect();

    roster
        .iter()
        .filter(|p| !completed.contains(p.player_name.as_str()))
        .map(|p| p.player_name.clone())
        .collect()
}
