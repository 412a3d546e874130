//! Line-oriented invocation loop.
//!
//! Each non-blank input line is one JSON [`Request`]; each produces exactly one
//! JSON [`Response`] line. A bad line is answered with an error response and
//! the loop carries on.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use mizuki_core::StateStore;
use mizuki_infra::CommandDispatcher;

use crate::wire::{Request, Response};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Requests that parsed, whether or not they succeeded.
    pub handled: u64,
    /// Parsed requests that failed.
    pub failed: u64,
    /// Lines that were not valid requests.
    pub malformed: u64,
}

/// Run one request through the dispatcher.
pub fn handle<S: StateStore>(dispatcher: &CommandDispatcher<S>, request: &Request) -> Response {
    match dispatcher.dispatch(request.kind, &request.function, request.args.as_slice()) {
        Ok(payload) => Response::success(payload),
        Err(err) => {
            warn!(
                function = %request.function,
                code = err.error_code(),
                error = %err,
                "invocation failed"
            );
            Response::failure(&err)
        }
    }
}

/// Serve requests from `input` until it is exhausted.
pub fn serve<S, R, W>(
    dispatcher: &CommandDispatcher<S>,
    input: R,
    mut output: W,
) -> std::io::Result<SessionStats>
where
    S: StateStore,
    R: BufRead,
    W: Write,
{
    let mut stats = SessionStats::default();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(trimmed) {
            Ok(request) => {
                debug!(function = %request.function, args = request.args.len(), "request");
                stats.handled += 1;
                let response = handle(dispatcher, &request);
                if !response.ok {
                    stats.failed += 1;
                }
                response
            }
            Err(err) => {
                warn!(error = %err, "malformed request line");
                stats.malformed += 1;
                Response::malformed(&err)
            }
        };

        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    Ok(stats)
}
