use std::collections::{HashMap, HashSet};

/// Channel membership table: board_id -> connection ids.
///
/// A channel exists only while it has members. The entry is created by the
/// first join and removed by whichever leave/disconnect empties it.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, HashSet<String>>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a board channel. Returns false if it was already a member.
    pub fn join(&mut self, board_id: &str, connection_id: &str) -> bool {
        self.channels
            .entry(board_id.to_string())
            .or_default()
            .insert(connection_id.to_string())
    }

    /// Removes a connection from a board channel. Returns false if it was not a member.
    pub fn leave(&mut self, board_id: &str, connection_id: &str) -> bool {
        let Some(members) = self.channels.get_mut(board_id) else {
            return false;
        };
        let removed = members.remove(connection_id);
        if members.is_empty() {
            self.channels.remove(board_id);
        }
        removed
    }

    /// Removes a connection from every channel, returning the boards it left
    pub fn remove_connection(&mut self, connection_id: &str) -> Vec<String> {
        let mut left = Vec::new();
        self.channels.retain(|board_id, members| {
            if members.remove(connection_id) {
                left.push(board_id.clone());
            }
            !members.is_empty()
        });
        left.sort();
        left
    }

    pub fn members(&self, board_id: &str) -> Vec<String> {
        self.channels
            .get(board_id)
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_member(&self, board_id: &str, connection_id: &str) -> bool {
        self.channels
            .get(board_id)
            .is_some_and(|members| members.contains(connection_id))
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
