/// User storage for identity service
///
/// Users live in process memory; a restart forgets them. Credentials already
/// issued stay verifiable until they expire, since verification never
/// consults storage.
pub mod users;

pub use users::UserStore;
