//! WebAssembly bindings for the Wordladders game engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen.
//! The browser front end passes the word list in once and then drives
//! the same roll/submit/end-turn calls a native front end would.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::dictionary::Dictionary;
#[cfg(feature = "wasm")]
use crate::game::GameState;
#[cfg(feature = "wasm")]
use crate::rules::{Rules, RulesOverride};

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper: owns the state and the dictionary.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    dictionary: Dictionary,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmGame {
    /// Create a new game from partial rules JSON (`{}` for defaults)
    /// and newline-separated word-list text.
    #[wasm_bindgen(constructor)]
    pub fn new(rules_json: &str, wordlist: &str) -> Result<WasmGame, JsValue> {
        let overrides: RulesOverride = serde_json::from_str(rules_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid rules: {}", e)))?;
        let rules = Rules::merged(overrides, &mut rand::thread_rng())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let state = GameState::new(rules).map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(WasmGame {
            state,
            dictionary: Dictionary::from_text(wordlist),
        })
    }

    /// Get the current game state as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_else(|_| "{}".to_string())
    }

    /// Roll and reveal in one step; returns the die or null.
    pub fn roll(&mut self) -> Option<u8> {
        self.state.roll()
    }

    /// Start a hidden roll, for the reveal animation.
    #[wasm_bindgen(js_name = beginRoll)]
    pub fn begin_roll(&mut self) -> bool {
        self.state.begin_roll()
    }

    /// Reveal the pending roll; returns the die or null.
    #[wasm_bindgen(js_name = finishRoll)]
    pub fn finish_roll(&mut self) -> Option<u8> {
        self.state.finish_roll()
    }

    /// Submit a word. Returns `{"accepted": bool, "reason"?: string,
    /// "events"?: [...]}` as JSON.
    #[wasm_bindgen(js_name = submitWord)]
    pub fn submit_word(&mut self, word: &str, use_wildcard: bool) -> String {
        match self.state.submit_word(&self.dictionary, word, use_wildcard) {
            Ok(events) => serde_json::json!({
                "accepted": true,
                "events": events,
            })
            .to_string(),
            Err(reason) => serde_json::json!({
                "accepted": false,
                "reason": reason,
            })
            .to_string(),
        }
    }

    /// Hand the turn over; returns the resulting events as JSON.
    #[wasm_bindgen(js_name = endTurn)]
    pub fn end_turn(&mut self) -> String {
        let events = self.state.end_turn(&self.dictionary);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Tick the turn clock; returns the seconds remaining.
    #[wasm_bindgen(js_name = decrementTimer)]
    pub fn decrement_timer(&mut self) -> u32 {
        self.state.decrement_timer()
    }

    /// Check if the game is finished
    #[wasm_bindgen(js_name = isFinished)]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Get the winner (if game is finished)
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<u8> {
        self.state.winner()
    }

    /// Up to `limit` hint words for the current constraints, as JSON.
    pub fn hints(&self, limit: usize) -> String {
        let hints = match self.state.required_length {
            Some(length) => self
                .dictionary
                .hints(self.state.start_letter, length, limit),
            None => Vec::new(),
        };
        serde_json::to_string(&hints).unwrap_or_else(|_| "[]".to_string())
    }

    /// Whether any word can satisfy the current constraints.
    #[wasm_bindgen(js_name = canSatisfy)]
    pub fn can_satisfy(&self) -> bool {
        match self.state.required_length {
            Some(length) => self
                .dictionary
                .can_satisfy(self.state.start_letter, length),
            None => false,
        }
    }
}
