//! Voice dictation buffer.
//!
//! The speech engine is external. It reports `(final, interim)` fragments; final
//! text accumulates, interim text is replaced on every report. Nothing reaches
//! the note until the user inserts the buffer.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Dictation {
    transcript: String,
    interim: String,
    recording: bool,
}

impl Dictation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.recording = true;
    }

    /// Stops listening. Text already delivered stays in the buffer.
    pub fn stop(&mut self) {
        self.recording = false;
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Applies one engine report; ignored once stopped.
    pub fn apply_result(&mut self, final_text: &str, interim_text: &str) {
        if !self.recording {
            return;
        }
        if !final_text.is_empty() {
            self.transcript.push_str(final_text);
            self.transcript.push(' ');
        }
        self.interim = interim_text.to_string();
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Final plus interim text, trimmed: what an insert would add.
    pub fn text(&self) -> String {
        format!("{}{}", self.transcript, self.interim).trim().to_string()
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.interim.clear();
    }

    /// Stops and empties the buffer, as closing the dictation panel does.
    pub fn close(&mut self) {
        self.stop();
        self.clear();
    }
}
