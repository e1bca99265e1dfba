//! IMAP command handlers.
//!
//! Each handler lives in its own module and processes a single IMAP
//! command. [`dispatch`] rejects untagged lines, looks the keyword up in
//! [`COMMANDS`], applies the authentication guard, and calls the handler
//! with the session and the raw argument text.

mod authenticate;
mod capability;
mod close;
mod expunge;
mod fetch;
mod list;
mod login;
mod logout;
mod lsub;
mod noop;
mod search;
mod select;
mod starttls;
mod uid;

use crate::command::{Command, UNTAGGED};
use crate::response::Response;
use crate::session::Session;

pub use authenticate::{complete_plain, handle_authenticate};
pub use capability::handle_capability;
pub use close::handle_close;
pub use expunge::handle_expunge;
pub use fetch::handle_fetch;
pub use list::handle_list;
pub use login::handle_login;
pub use logout::handle_logout;
pub use lsub::handle_lsub;
pub use noop::handle_noop;
pub use search::handle_search;
pub use select::{handle_examine, handle_select};
pub use starttls::handle_starttls;
pub use uid::handle_uid;

/// Finishes a command once the client has answered a continuation
/// request.
pub type Continuation = fn(&mut Session, &str) -> Response;

/// A command handler: session state plus the raw argument text.
pub type Handler = fn(&mut Session, Option<&str>) -> Outcome;

/// What the session loop must do with a handler's result.
#[derive(Debug)]
pub enum Outcome {
    /// Write the response and read the next command.
    Reply(Response),
    /// Write the response, then run the TLS handshake and continue on
    /// the secure transport.
    StartTls(Response),
    /// Send a continuation request, read one more line, and pass it to
    /// the continuation.
    Challenge(Continuation),
    /// Write the response and close the connection.
    Logout(Response),
}

/// One row of the command table.
pub struct Entry {
    pub name: &'static str,
    /// Requires an authenticated session.
    pub guarded: bool,
    pub handler: Handler,
}

pub const COMMANDS: &[Entry] = &[
    Entry {
        name: "CAPABILITY",
        guarded: false,
        handler: handle_capability,
    },
    Entry {
        name: "STARTTLS",
        guarded: false,
        handler: handle_starttls,
    },
    Entry {
        name: "AUTHENTICATE",
        guarded: false,
        handler: handle_authenticate,
    },
    Entry {
        name: "LOGIN",
        guarded: false,
        handler: handle_login,
    },
    Entry {
        name: "LIST",
        guarded: true,
        handler: handle_list,
    },
    Entry {
        name: "LSUB",
        guarded: true,
        handler: handle_lsub,
    },
    Entry {
        name: "SEARCH",
        guarded: true,
        handler: handle_search,
    },
    Entry {
        name: "UID",
        guarded: true,
        handler: handle_uid,
    },
    Entry {
        name: "FETCH",
        guarded: true,
        handler: handle_fetch,
    },
    Entry {
        name: "SELECT",
        guarded: true,
        handler: handle_select,
    },
    Entry {
        name: "EXAMINE",
        guarded: true,
        handler: handle_examine,
    },
    Entry {
        name: "CLOSE",
        guarded: true,
        handler: handle_close,
    },
    Entry {
        name: "EXPUNGE",
        guarded: true,
        handler: handle_expunge,
    },
    Entry {
        name: "NOOP",
        guarded: false,
        handler: handle_noop,
    },
    Entry {
        name: "LOGOUT",
        guarded: false,
        handler: handle_logout,
    },
];

/// Route a parsed command to its handler.
///
/// A line without a tag is answered with `* BAD` and leaves the session
/// untouched.
pub fn dispatch(session: &mut Session, command: &Command) -> Outcome {
    if !command.is_tagged() {
        return Outcome::Reply(Response::bad(UNTAGGED, "Missing tag"));
    }
    session.set_tag(&command.tag);

    let Some(entry) = COMMANDS.iter().find(|e| e.name == command.name) else {
        return Outcome::Reply(Response::bad(session.tag(), "Command not recognized"));
    };

    if entry.guarded && !session.is_authenticated() {
        return Outcome::Reply(Response::no(session.tag(), "Not authenticated"));
    }

    (entry.handler)(session, command.remainder.as_deref())
}
