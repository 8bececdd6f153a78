use std::fmt::Write;

use crate::instructions::ActivityStatus;

/// Turns raw user ids into names people recognise, e.g. a group nickname
/// looked up from the chat platform. Only presentation uses it.
pub trait NameResolver {
    fn display_name(&self, group_id: &str, user_id: &str) -> String;
}

/// Shows raw ids unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawIds;

impl NameResolver for RawIds {
    fn display_name(&self, _group_id: &str, user_id: &str) -> String {
        user_id.to_string()
    }
}

impl<F> NameResolver for F
where
    F: Fn(&str, &str) -> String,
{
    fn display_name(&self, group_id: &str, user_id: &str) -> String {
        self(group_id, user_id)
    }
}

impl ActivityStatus {
    /// Human-readable status board for posting back to the group.
    pub fn render(&self, resolver: &dyn NameResolver) -> String {
        let mut out = String::new();
        let state = if self.overview.active { "running" } else { "stopped" };

        let _ = writeln!(out, "Lottery status: {state}");
        let _ = writeln!(
            out,
            "Participants: {} | Winners: {}",
            self.overview.participants, self.overview.winners
        );

        let _ = writeln!(out, "Prizes left:");
        for prize in &self.prize_left {
            let _ = writeln!(
                out,
                "  {} {} ({}): {}/{}",
                prize.level.emoji(),
                prize.level.label(),
                prize.name,
                prize.remaining,
                prize.total
            );
        }

        if self.winners_by_level.is_empty() {
            let _ = write!(out, "No winners yet");
            return out;
        }
        let _ = write!(out, "Winners:");
        for group in &self.winners_by_level {
            let names: Vec<String> = group
                .user_ids
                .iter()
                .map(|user_id| resolver.display_name(&self.group_id, user_id))
                .collect();
            let _ = write!(
                out,
                "\n  {} {}: {}",
                group.level.emoji(),
                group.level.label(),
                names.join(", ")
            );
        }
        out
    }
}
