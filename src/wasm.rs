//! JS-facing wrapper around [`GameInstance`].
//!
//! Rendering, flip animation and timers live in the page script; it calls in
//! here and schedules whatever `nextAction` reports.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::GameInstance;
use crate::types::Side;

#[wasm_bindgen]
pub struct ReversiGame {
    inner: GameInstance,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` may be `undefined` or a partial `GameConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&e.to_string()))?
        };

        Ok(Self {
            inner: GameInstance::with_greedy(config)?,
        })
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self, human_is_white: bool) {
        let side = if human_is_white {
            Side::White
        } else {
            Side::Black
        };
        self.inner.new_game(side);
    }

    pub fn place(&mut self, row: usize, col: usize) -> Result<JsValue, JsError> {
        let pos = self.inner.place(row, col)?;
        to_js(&pos)
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsError> {
        let pos = self.inner.do_ai_move()?;
        to_js(&pos)
    }

    pub fn pass(&mut self) -> Result<JsValue, JsError> {
        let status = self.inner.pass()?;
        to_js(&status)
    }

    pub fn advance(&mut self) -> Result<JsValue, JsError> {
        let status = self.inner.advance()?;
        to_js(&status)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.legal_moves())
    }

    #[wasm_bindgen(js_name = hintMoves)]
    pub fn hint_moves(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.hint_moves())
    }

    pub fn status(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.status())
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_state())
    }

    pub fn result(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.to_game_result())
    }

    /// `undefined` when waiting on the human or after game over.
    #[wasm_bindgen(js_name = nextAction)]
    pub fn next_action(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.next_action())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}
