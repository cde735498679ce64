//! Chat session: the interaction cycle around the conversation memory.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use minichat_core::{MemoryError, ResponseGenerator};
use minichat_memory::{BufferConfig, ConversationBuffer, SnapshotFile, TopicTracker};
use thiserror::Error;
use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::command::{Command, HELP_TEXT};

/// Shown instead of a response when generation fails.
pub const GENERATION_ERROR_MESSAGE: &str =
    "I apologize, but I encountered an error while generating a response. Please try again.";

/// Errors that can occur while running a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] MemoryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of one interaction cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Text to show the user
    pub response: String,
    /// Whether the turn was stored in memory
    pub recorded: bool,
}

/// Result of a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: String,
    pub keep_running: bool,
}

impl CommandOutcome {
    fn continue_with(output: String) -> Self {
        Self {
            output,
            keep_running: true,
        }
    }
}

/// Exit status used when a second Ctrl-C forces the process down.
const FORCED_EXIT_CODE: i32 = 130;

/// Cloneable handle that stops a running session from another task.
///
/// Interrupting clears the running flag and wakes whatever the session is
/// currently awaiting, whether that is the next input line or a response.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    running: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl InterruptHandle {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            notify: Arc::new(Notify::new()),
        }
    }

    pub fn interrupt(&self) {
        self.running.store(false, Ordering::Relaxed);
        self.notify.notify_one();
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    async fn interrupted(&self) {
        self.notify.notified().await;
    }
}

/// Read stdin line by line on a dedicated thread.
///
/// Blocking reads never run on the async runtime, so a pending read cannot
/// hold up shutdown. The thread ends at EOF, on a read error, or once the
/// receiver is dropped.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if tx.send(line).is_err() {
                    break;
                }
            }
            debug!("stdin reader finished");
        })?;
    Ok(rx)
}

/// One conversation: a buffer and topic tracker pair plus the generator
/// that produces responses.
pub struct ChatSession<G = Arc<dyn ResponseGenerator>>
where
    G: ResponseGenerator,
{
    id: Uuid,
    generator: G,
    buffer: ConversationBuffer,
    topics: TopicTracker,
    interrupt: InterruptHandle,
}

impl<G> ChatSession<G>
where
    G: ResponseGenerator,
{
    pub fn new(generator: G, config: BufferConfig) -> Self {
        let id = Uuid::now_v7();
        info!(
            "Initialized chat session {id} with model: {}",
            generator.model_name()
        );

        Self {
            id,
            generator,
            buffer: ConversationBuffer::with_config(config),
            topics: TopicTracker::new(),
            interrupt: InterruptHandle::new(),
        }
    }

    /// Run one cycle for `input`.
    ///
    /// On generation failure the turn is skipped and memory is unchanged.
    pub async fn process_turn(&mut self, input: &str) -> TurnOutcome {
        let prompt = self.buffer.render_prompt(input);

        match self.generator.generate(&prompt).await {
            Ok(response) => {
                self.buffer.add_turn(input, &response);
                self.topics.observe(input, &response);
                TurnOutcome {
                    response,
                    recorded: true,
                }
            }
            Err(e) => {
                error!("Response generation error: {e}");
                TurnOutcome {
                    response: GENERATION_ERROR_MESSAGE.to_string(),
                    recorded: false,
                }
            }
        }
    }

    /// Execute a slash command against this session.
    pub fn handle_command(&mut self, command: Command) -> Result<CommandOutcome, SessionError> {
        let outcome = match command {
            Command::Exit => {
                self.stop();
                CommandOutcome {
                    output: self.farewell(),
                    keep_running: false,
                }
            }
            Command::Clear => {
                self.buffer.clear();
                self.topics.clear();
                CommandOutcome::continue_with("🧹 Conversation memory cleared!".to_string())
            }
            Command::Stats => CommandOutcome::continue_with(self.stats_report()),
            Command::Topics => CommandOutcome::continue_with(self.topics.summary()),
            Command::Help => CommandOutcome::continue_with(HELP_TEXT.to_string()),
            Command::Export(path) => {
                self.export_to(&path)?;
                CommandOutcome::continue_with(format!(
                    "💾 Saved {} turns to {}",
                    self.buffer.len(),
                    path.display()
                ))
            }
            Command::Import(path) => {
                let imported = self.import_from(&path)?;
                CommandOutcome::continue_with(format!(
                    "📥 Imported {imported} turns from {}",
                    path.display()
                ))
            }
            Command::MissingArgument(name) => {
                CommandOutcome::continue_with(format!("❓ Usage: {name} <path>"))
            }
            Command::Unknown(name) => CommandOutcome::continue_with(format!(
                "❓ Unknown command: {name}\nType /help to see available commands."
            )),
        };
        Ok(outcome)
    }

    /// Save the buffer contents to a snapshot file.
    pub fn export_to(&self, path: &Path) -> Result<(), SessionError> {
        SnapshotFile::save(path, &self.buffer.export_snapshot())?;
        Ok(())
    }

    /// Replace the buffer contents from a snapshot file and rebuild topics.
    pub fn import_from(&mut self, path: &Path) -> Result<usize, SessionError> {
        let records = SnapshotFile::load(path)?;
        let imported = self.buffer.import_snapshot(&records);
        self.topics.clear();
        self.topics.seed_from(&self.buffer);
        Ok(imported)
    }

    fn stats_report(&self) -> String {
        let stats = self.buffer.stats();
        let info = self.generator.describe();

        let mut report = format!(
            "📊 Chatbot Statistics:\n  • Total conversation turns: {}\n  • Current memory buffer: {}/{}\n  • Memory buffer full: {}\n  • Model: {}\n  • Backend: {}",
            stats.total_turns_seen,
            stats.current_length,
            stats.capacity,
            if stats.is_full { "Yes" } else { "No" },
            info.model_name,
            info.backend
        );
        if !self.buffer.recent(Some(3)).is_empty() {
            report.push_str("\n  • Recent topics: ");
            report.push_str(&self.topics.summary());
        }
        report
    }

    fn farewell(&self) -> String {
        let total = self.buffer.total_turns_seen();
        if total > 0 {
            format!("👋 Exiting chatbot. Goodbye!\n📈 Total conversation turns: {total}")
        } else {
            "👋 Exiting chatbot. Goodbye!".to_string()
        }
    }

    /// Spawn a task that interrupts this session on Ctrl-C.
    ///
    /// A second Ctrl-C exits the process straight away, for when the session
    /// is stuck somewhere the interrupt cannot reach.
    pub fn spawn_interrupt_listener(&self) -> JoinHandle<()> {
        let handle = self.interrupt_handle();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {e}");
                return;
            }
            handle.interrupt();

            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Second interrupt received, exiting immediately");
                std::process::exit(FORCED_EXIT_CODE);
            }
        })
    }

    /// Read stdin and write stdout until `/exit`, EOF or Ctrl-C.
    pub async fn run_interactive(&mut self) -> Result<(), SessionError> {
        let lines = spawn_stdin_reader()?;
        let listener = self.spawn_interrupt_listener();
        let mut stdout = std::io::stdout();

        let result = self.run_loop(lines, &mut stdout).await;
        listener.abort();
        result
    }

    /// The interactive loop over lines from `lines`, writing to `out`.
    ///
    /// Ends on `/exit`, when the sender side closes, or when the session is
    /// interrupted. An interrupt that arrives while a response is being
    /// generated abandons that turn.
    pub async fn run_loop<W>(
        &mut self,
        mut lines: mpsc::UnboundedReceiver<String>,
        out: &mut W,
    ) -> Result<(), SessionError>
    where
        W: Write,
    {
        let interrupt = self.interrupt_handle();
        writeln!(out, "=== Conversation Session: {} ===", self.id)?;
        writeln!(out, "Type your messages and press Enter to chat.")?;
        writeln!(out, "{HELP_TEXT}")?;

        let mut said_goodbye = false;
        let mut interrupted = false;
        while self.is_running() {
            write!(out, "\n👤 You: ")?;
            out.flush()?;

            let line = tokio::select! {
                line = lines.recv() => line,
                () = interrupt.interrupted() => {
                    interrupted = true;
                    None
                }
            };

            let Some(line) = line else {
                break;
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }

            if let Some(command) = Command::parse(input) {
                match self.handle_command(command) {
                    Ok(outcome) => {
                        said_goodbye = !outcome.keep_running;
                        writeln!(out, "{}", outcome.output)?;
                    }
                    Err(e) => {
                        error!("Command failed: {e}");
                        writeln!(out, "❌ {e}")?;
                    }
                }
                continue;
            }

            let outcome = tokio::select! {
                outcome = self.process_turn(input) => Some(outcome),
                () = interrupt.interrupted() => None,
            };
            let Some(outcome) = outcome else {
                interrupted = true;
                break;
            };
            writeln!(out, "🤖 Bot: {}", outcome.response)?;
        }

        if !said_goodbye {
            if interrupted {
                writeln!(out, "\n\n⚠️  Received interrupt signal...")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", self.farewell())?;
            self.stop();
        }

        info!("Chat session {} ended", self.id);
        Ok(())
    }

    /// Handle for stopping the session from a signal handler or another task.
    #[must_use]
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interrupt.is_running()
    }

    pub fn stop(&self) {
        self.interrupt.running.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn buffer(&self) -> &ConversationBuffer {
        &self.buffer
    }

    #[must_use]
    pub const fn topics(&self) -> &TopicTracker {
        &self.topics
    }

    #[must_use]
    pub const fn generator(&self) -> &G {
        &self.generator
    }
}
