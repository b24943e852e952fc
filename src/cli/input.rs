//! Interactive line input with interrupt handling
//!
//! A single interrupt while waiting for a line discards the partial line and
//! redraws the prompt. A second interrupt within the debounce window ends
//! input altogether.
//!
//! Interrupts are classified by a background listener task and delivered to
//! the reading side as [`InterruptEvent`]s over a channel, so the interrupt
//! timestamp is never shared between tasks.

use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Stdin};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::console::Console;

/// Two interrupts closer together than this mean "quit"
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(2);

const CHANNEL_CAPACITY: usize = 8;

/// Classified interrupt, as seen by the line reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptEvent {
    /// Discard the current line and prompt again
    Clear,
    /// Stop reading input
    Exit,
}

/// Turns raw interrupt times into [`InterruptEvent`]s
#[derive(Debug, Clone)]
pub struct InterruptClassifier {
    last: Option<Instant>,
    window: Duration,
}

impl InterruptClassifier {
    pub fn new(window: Duration) -> Self {
        Self { last: None, window }
    }

    /// Classify an interrupt received at `now`
    ///
    /// Only a `Clear` moves the recorded timestamp.
    pub fn classify(&mut self, now: Instant) -> InterruptEvent {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.window => InterruptEvent::Exit,
            _ => {
                self.last = Some(now);
                InterruptEvent::Clear
            }
        }
    }
}

impl Default for InterruptClassifier {
    fn default() -> Self {
        Self::new(DEBOUNCE_WINDOW)
    }
}

/// Where a `read_line` call is in its acquisition loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Waiting for a line or an interrupt
    Idle,
    /// Consumed a single interrupt, about to wait again
    Clearing,
    /// Terminal; no more lines will be returned
    Exiting,
}

/// Reads user lines while listening for interrupts
///
/// # Example
///
/// ```ignore
/// let mut input = InputManager::stdin();
/// while let Some(line) = input.read_line().await {
///     // handle line
/// }
/// input.cleanup();
/// ```
pub struct InputManager<R> {
    reader: BufReader<R>,
    /// Bytes of the line being typed; survives a dropped read
    pending: Vec<u8>,
    events: mpsc::Receiver<InterruptEvent>,
    /// False once the listener is gone and `events` can no longer fire
    listening: bool,
    state: InputState,
    console: Console,
    listener: Option<JoinHandle<()>>,
    forwarder: Option<JoinHandle<()>>,
}

impl InputManager<Stdin> {
    /// Read from stdin, with interrupts taken from Ctrl-C
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

impl<R: AsyncRead + Unpin> InputManager<R> {
    /// Read from `reader`, with interrupts taken from Ctrl-C
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(reader: R) -> Self {
        let (raw_tx, raw_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut manager = Self::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);
        manager.forwarder = Some(tokio::spawn(forward_ctrl_c(raw_tx)));
        manager
    }

    /// Read from `reader`, with interrupts delivered as raw instants on `raw`
    pub fn with_interrupts(reader: R, raw: mpsc::Receiver<Instant>, window: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let listener = tokio::spawn(listen(raw, event_tx, window));

        Self {
            reader: BufReader::new(reader),
            pending: Vec::new(),
            events: event_rx,
            listening: true,
            state: InputState::Idle,
            console: Console::new(),
            listener: Some(listener),
            forwarder: None,
        }
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Wait for the next complete line
    ///
    /// Returns `None` when the caller should stop: a double interrupt, end
    /// of input, or a read error. Once `None` has been returned every later
    /// call returns `None` as well.
    pub async fn read_line(&mut self) -> Option<String> {
        loop {
            match self.state {
                InputState::Exiting => return None,
                InputState::Clearing => {
                    self.console.clear_and_prompt();
                    self.state = InputState::Idle;
                }
                InputState::Idle => {}
            }

            // Reading goes first so bytes typed before an interrupt land in
            // `pending` and are discarded with it
            let listening = self.listening;
            tokio::select! {
                biased;
                read = self.reader.read_until(b'\n', &mut self.pending) => match read {
                    Ok(0) => {
                        tracing::info!("[Input] End of input");
                        self.state = InputState::Exiting;
                    }
                    Ok(_) => return Some(take_line(&mut self.pending)),
                    Err(e) => {
                        tracing::warn!("[Input] Read error: {}", e);
                        self.state = InputState::Exiting;
                    }
                },
                event = self.events.recv(), if listening => match event {
                    Some(InterruptEvent::Clear) => {
                        tracing::debug!("[Input] Interrupt, discarding {} pending bytes", self.pending.len());
                        self.pending.clear();
                        self.state = InputState::Clearing;
                    }
                    Some(InterruptEvent::Exit) => {
                        tracing::info!("[Input] Double interrupt, exiting");
                        self.state = InputState::Exiting;
                    }
                    None => self.listening = false,
                },
            }
        }
    }

    /// Stop the interrupt listener and release the signal subscription
    ///
    /// Safe to call more than once.
    pub fn cleanup(&mut self) {
        let mut stopped = false;
        for handle in [self.forwarder.take(), self.listener.take()].into_iter().flatten() {
            handle.abort();
            stopped = true;
        }
        if stopped {
            tracing::debug!("[Input] Interrupt listener stopped");
        }
        self.listening = false;
    }
}

impl<R> Drop for InputManager<R> {
    fn drop(&mut self) {
        for handle in [self.forwarder.take(), self.listener.take()].into_iter().flatten() {
            handle.abort();
        }
    }
}

/// Decode and reset the pending buffer, dropping the line terminator
fn take_line(pending: &mut Vec<u8>) -> String {
    if pending.ends_with(b"\n") {
        pending.pop();
    }
    if pending.ends_with(b"\r") {
        pending.pop();
    }
    let line = String::from_utf8_lossy(pending).into_owned();
    pending.clear();
    line
}

/// Classify raw interrupts until an exit is seen or either side goes away
async fn listen(
    mut raw: mpsc::Receiver<Instant>,
    events: mpsc::Sender<InterruptEvent>,
    window: Duration,
) {
    let mut classifier = InterruptClassifier::new(window);

    while let Some(at) = raw.recv().await {
        let event = classifier.classify(at);
        if events.send(event).await.is_err() {
            return;
        }
        if event == InterruptEvent::Exit {
            return;
        }
    }
}

/// Feed Ctrl-C presses into the listener
async fn forward_ctrl_c(raw: mpsc::Sender<Instant>) {
    loop {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("[Input] Failed to listen for Ctrl-C: {}", e);
            return;
        }
        if raw.send(Instant::now()).await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn test_classifier_gaps_over_window_are_clears() {
        let base = Instant::now();
        let mut classifier = InterruptClassifier::default();

        assert_eq!(classifier.classify(base), InterruptEvent::Clear);
        assert_eq!(classifier.classify(base + Duration::from_secs(3)), InterruptEvent::Clear);
        assert_eq!(classifier.classify(base + Duration::from_secs(6)), InterruptEvent::Clear);
    }

    #[test]
    fn test_classifier_gap_under_window_is_exit() {
        let base = Instant::now();
        let mut classifier = InterruptClassifier::default();

        assert_eq!(classifier.classify(base), InterruptEvent::Clear);
        assert_eq!(
            classifier.classify(base + Duration::from_millis(500)),
            InterruptEvent::Exit
        );
    }

    #[test]
    fn test_classifier_exit_does_not_move_timestamp() {
        let base = Instant::now();
        let mut classifier = InterruptClassifier::new(Duration::from_secs(2));

        classifier.classify(base);
        classifier.classify(base + Duration::from_secs(1));
        // Measured from the first interrupt, not the second
        assert_eq!(
            classifier.classify(base + Duration::from_millis(2500)),
            InterruptEvent::Clear
        );
    }

    #[tokio::test]
    async fn test_listener_classifies_in_order() {
        let (raw_tx, raw_rx) = mpsc::channel(8);
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let handle = tokio::spawn(listen(raw_rx, event_tx, DEBOUNCE_WINDOW));

        let base = Instant::now();
        raw_tx.send(base).await.unwrap();
        raw_tx.send(base + Duration::from_secs(3)).await.unwrap();
        raw_tx.send(base + Duration::from_millis(3100)).await.unwrap();

        assert_eq!(event_rx.recv().await, Some(InterruptEvent::Clear));
        assert_eq!(event_rx.recv().await, Some(InterruptEvent::Clear));
        assert_eq!(event_rx.recv().await, Some(InterruptEvent::Exit));

        // The listener stops after an exit
        handle.await.unwrap();
        assert_eq!(event_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_read_line_returns_lines() {
        let (_raw_tx, raw_rx) = mpsc::channel(8);
        let reader: &[u8] = b"hello\r\nworld\n";
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        assert_eq!(input.read_line().await.as_deref(), Some("hello"));
        assert_eq!(input.read_line().await.as_deref(), Some("world"));
        assert_eq!(input.read_line().await, None);
        assert_eq!(input.state(), InputState::Exiting);
        assert_eq!(input.read_line().await, None);
    }

    #[tokio::test]
    async fn test_single_interrupt_clears_and_retries() {
        let (raw_tx, raw_rx) = mpsc::channel(8);
        let (reader, mut writer) = tokio::io::duplex(64);
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        let feed = async move {
            raw_tx.send(Instant::now()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            writer.write_all(b"after clear\n").await.unwrap();
            (raw_tx, writer)
        };

        let (line, _keep) = tokio::join!(input.read_line(), feed);
        assert_eq!(line.as_deref(), Some("after clear"));
        assert_eq!(input.state(), InputState::Idle);
    }

    #[tokio::test]
    async fn test_clear_discards_partial_line() {
        let (raw_tx, raw_rx) = mpsc::channel(8);
        let (reader, mut writer) = tokio::io::duplex(64);
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        let feed = async move {
            writer.write_all(b"partial typed text").await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            raw_tx.send(Instant::now()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            writer.write_all(b"fresh\n").await.unwrap();
            (raw_tx, writer)
        };

        let (line, _keep) = tokio::join!(input.read_line(), feed);
        assert_eq!(line.as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_final_line_without_newline() {
        let (_raw_tx, raw_rx) = mpsc::channel(8);
        let reader: &[u8] = b"first\nlast";
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        assert_eq!(input.read_line().await.as_deref(), Some("first"));
        assert_eq!(input.read_line().await.as_deref(), Some("last"));
        assert_eq!(input.read_line().await, None);
    }

    #[tokio::test]
    async fn test_double_interrupt_stops_reading() {
        let (raw_tx, raw_rx) = mpsc::channel(8);
        let (reader, _writer) = tokio::io::duplex(64);
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        let now = Instant::now();
        raw_tx.send(now).await.unwrap();
        raw_tx.send(now + Duration::from_millis(100)).await.unwrap();

        assert_eq!(input.read_line().await, None);
        assert_eq!(input.state(), InputState::Exiting);
    }

    #[tokio::test]
    async fn test_closed_listener_still_reads_lines() {
        let (raw_tx, raw_rx) = mpsc::channel::<Instant>(8);
        drop(raw_tx);
        let reader: &[u8] = b"still here\n";
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        assert_eq!(input.read_line().await.as_deref(), Some("still here"));
    }

    #[tokio::test]
    async fn test_cleanup_is_idempotent() {
        let (_raw_tx, raw_rx) = mpsc::channel(8);
        let reader: &[u8] = b"line\n";
        let mut input = InputManager::with_interrupts(reader, raw_rx, DEBOUNCE_WINDOW);

        input.cleanup();
        input.cleanup();

        // Lines are still readable after the listener is gone
        assert_eq!(input.read_line().await.as_deref(), Some("line"));
        drop(input);
    }
}
