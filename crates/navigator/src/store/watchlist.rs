use super::{dedupe_by, read_collection, write_collection, KeyValueStore};
use crate::models::WatchlistMember;

pub const WATCHLIST_KEY: &str = "parliament-navigator-watchlist";

/// Members the user is tracking, unique by member id
pub struct Watchlist<S> {
  store: S,
  members: Vec<WatchlistMember>,
}

impl<S: KeyValueStore> Watchlist<S> {
  pub fn load(store: S) -> Self {
    let members = read_collection(&store, WATCHLIST_KEY).unwrap_or_default();
    let members = dedupe_by(members, |member: &WatchlistMember| member.id);
    Self { store, members }
  }

  pub fn members(&self) -> &[WatchlistMember] {
    &self.members
  }

  pub fn contains(&self, id: u32) -> bool {
    self.members.iter().any(|member| member.id == id)
  }

  /// Track a member. Returns `false` (and changes nothing) if already tracked.
  pub fn add(&mut self, member: impl Into<WatchlistMember>) -> bool {
    let member = member.into();
    if self.contains(member.id) {
      return false;
    }
    self.members.push(member);
    self.save();
    true
  }

  pub fn remove(&mut self, id: u32) -> bool {
    let before = self.members.len();
    self.members.retain(|member| member.id != id);
    let removed = self.members.len() != before;
    if removed {
      self.save();
    }
    removed
  }

  fn save(&self) {
    write_collection(&self.store, WATCHLIST_KEY, &self.members);
  }
}
