//! Debug socket for `buildmate-cli`.
//!
//! Clients write one JSON command or query per line and get one JSON result
//! per line back. Socket threads only queue requests; the window drains the
//! queue from `render`, so the editor is only ever touched on the UI thread.

use crate::{execute_command_in_context, execute_query_in_context, Command, Query};
use editor::LayoutEditor;
use gpui::{Context, Entity};
use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

/// Environment variable that enables the debug server.
pub const DEBUG_ENV: &str = "BUILDMATE_DEBUG";
/// Socket files are `/tmp/<prefix><pid>.sock`.
pub const SOCKET_PREFIX: &str = "buildmate-";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// Socket path used by the process with the given id.
pub fn socket_path_for(pid: u32) -> PathBuf {
    PathBuf::from(format!("/tmp/{}{}.sock", SOCKET_PREFIX, pid))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// One-shot slot the UI thread fills in and the client thread waits on.
#[derive(Default)]
struct Reply {
    value: Mutex<Option<String>>,
    ready: Condvar,
    abandoned: AtomicBool,
}

impl Reply {
    fn fill(&self, response: String) {
        *lock(&self.value) = Some(response);
        self.ready.notify_one();
    }

    fn wait(&self, timeout: Duration) -> Option<String> {
        let guard = lock(&self.value);
        let (mut guard, _) = self
            .ready
            .wait_timeout_while(guard, timeout, |value| value.is_none())
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let response = guard.take();
        if response.is_none() {
            // The client has given up; the request must not run later
            self.abandoned.store(true, Ordering::SeqCst);
        }
        response
    }

    fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

struct Request {
    json: String,
    reply: Arc<Reply>,
}

/// State shared by the accept thread, client threads and the UI thread.
#[derive(Default)]
struct Shared {
    queue: Mutex<VecDeque<Request>>,
    running: AtomicBool,
}

impl Shared {
    /// Queue `json` for the UI thread and block until it is answered.
    fn submit(&self, json: String, timeout: Duration) -> Option<String> {
        let reply = Arc::new(Reply::default());
        lock(&self.queue).push_back(Request {
            json,
            reply: reply.clone(),
        });
        reply.wait(timeout)
    }

    /// Next request whose client is still waiting. Abandoned ones are dropped.
    fn next(&self) -> Option<Request> {
        let mut queue = lock(&self.queue);
        while let Some(request) = queue.pop_front() {
            if request.reply.is_abandoned() {
                log::warn!("dropping timed out debug request: {}", request.json);
                continue;
            }
            return Some(request);
        }
        None
    }
}

/// Debug server that accepts CLI connections.
pub struct DebugServer {
    socket_path: PathBuf,
    shared: Arc<Shared>,
}

impl DebugServer {
    /// Server on this process's socket path.
    pub fn new() -> Self {
        Self::at(socket_path_for(std::process::id()))
    }

    pub fn at(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
            shared: Arc::new(Shared::default()),
        }
    }

    /// True when `BUILDMATE_DEBUG` is `1` or `true`.
    pub fn should_start() -> bool {
        matches!(std::env::var(DEBUG_ENV).as_deref(), Ok("1") | Ok("true"))
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Bind the socket and accept clients on a background thread.
    pub fn start(&self) -> io::Result<()> {
        // A previous run may have left its socket behind
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        listener.set_nonblocking(true)?;
        self.shared.running.store(true, Ordering::SeqCst);

        log::info!("debug server listening on {}", self.socket_path.display());

        let shared = self.shared.clone();
        let socket_path = self.socket_path.clone();
        thread::spawn(move || {
            accept_clients(listener, &shared);
            let _ = std::fs::remove_file(&socket_path);
        });

        Ok(())
    }

    /// Answer every queued request. Must run on the UI thread.
    pub fn process_pending<T: 'static>(&self, editor: &Entity<LayoutEditor>, cx: &mut Context<T>) {
        while let Some(request) = self.shared.next() {
            let response = process_message(editor, &request.json, cx);
            request.reply.fill(response);
        }
    }

    pub fn has_pending(&self) -> bool {
        lock(&self.shared.queue)
            .iter()
            .any(|request| !request.reply.is_abandoned())
    }

    /// Stop accepting clients. The socket file is removed by the accept thread.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::SeqCst);
    }
}

impl Default for DebugServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebugServer {
    fn drop(&mut self) {
        self.stop();
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

fn accept_clients(listener: UnixListener, shared: &Arc<Shared>) {
    while shared.running.load(Ordering::SeqCst) {
        match listener.accept() {
            Ok((stream, _)) => {
                let shared = shared.clone();
                thread::spawn(move || {
                    if let Err(e) = serve_client(stream, &shared) {
                        log::warn!("debug client error: {}", e);
                    }
                });
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => thread::sleep(ACCEPT_POLL),
            Err(e) => log::error!("debug server accept error: {}", e),
        }
    }
}

fn serve_client(stream: UnixStream, shared: &Shared) -> io::Result<()> {
    // Accepted sockets inherit non-blocking mode on some platforms
    stream.set_nonblocking(false)?;
    let reader = BufReader::new(stream.try_clone()?);
    let mut writer = stream;

    for line in reader.lines() {
        let line = line?;
        let json = line.trim();
        if json.is_empty() {
            continue;
        }

        let response = shared
            .submit(json.to_string(), REQUEST_TIMEOUT)
            .unwrap_or_else(|| error_json("Request timed out"));
        writeln!(writer, "{}", response)?;
        writer.flush()?;
    }

    Ok(())
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "status": "error", "message": message }).to_string()
}

/// Handle one request line: a [`Command`] if it parses as one, else a [`Query`].
pub fn process_message<T: 'static>(editor: &Entity<LayoutEditor>, json: &str, cx: &mut Context<T>) -> String {
    let response = if let Ok(command) = serde_json::from_str::<Command>(json) {
        log::debug!("debug command: {:?}", command);
        serde_json::to_string(&execute_command_in_context(editor, command, cx))
    } else if let Ok(query) = serde_json::from_str::<Query>(json) {
        serde_json::to_string(&execute_query_in_context(editor, query, cx))
    } else {
        return error_json("Invalid JSON: not a valid command or query");
    };

    response.unwrap_or_else(|e| error_json(&format!("Serialization failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_path_uses_pid() {
        assert_eq!(socket_path_for(4242), PathBuf::from("/tmp/buildmate-4242.sock"));
    }

    #[test]
    fn error_json_is_a_command_result() {
        let value: crate::CommandResult = serde_json::from_str(&error_json("bad \"input\"")).unwrap();
        assert_eq!(value, crate::CommandResult::error("bad \"input\""));
    }

    #[test]
    fn queued_request_is_answered_from_another_thread() {
        let shared = Arc::new(Shared::default());
        let client = {
            let shared = shared.clone();
            thread::spawn(move || shared.submit("{}".into(), Duration::from_secs(5)))
        };

        let request = loop {
            if let Some(request) = shared.next() {
                break request;
            }
            thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(request.json, "{}");
        request.reply.fill("ok".into());

        assert_eq!(client.join().unwrap(), Some("ok".to_string()));
    }

    #[test]
    fn unanswered_request_times_out() {
        let shared = Shared::default();
        assert_eq!(shared.submit("{}".into(), Duration::from_millis(10)), None);
        assert!(shared.next().is_none());
    }

    #[test]
    fn timed_out_request_is_skipped_but_later_ones_run() {
        let shared = Arc::new(Shared::default());
        assert_eq!(shared.submit("stale".into(), Duration::from_millis(10)), None);

        let client = {
            let shared = shared.clone();
            thread::spawn(move || shared.submit("fresh".into(), Duration::from_secs(5)))
        };

        let request = loop {
            if let Some(request) = shared.next() {
                break request;
            }
            thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(request.json, "fresh");
        request.reply.fill("ok".into());

        assert_eq!(client.join().unwrap(), Some("ok".to_string()));
        assert!(shared.next().is_none());
    }

    #[test]
    fn server_starts_and_cleans_up() {
        let path = std::env::temp_dir().join(format!("buildmate-test-{}.sock", std::process::id()));
        let server = DebugServer::at(&path);
        server.start().expect("bind");
        assert!(path.exists());
        assert!(!server.has_pending());
        drop(server);
        assert!(!path.exists());
    }
}
