//! nationality-wasm — WebAssembly bindings for nationality-core
//!
//! Exposes the builtin country catalog and the headless nationality picker
//! to JavaScript. Rendering stays in JS; this module owns lookups, search,
//! keyboard/selection state and the guarded profile update.
//!
//! What it provides
//! ----------------
//! - Automatic initialization on module load (via `#[wasm_bindgen(start)]`)
//! - Lookups: `resolve_country(code)`, `is_valid_code(code)`, `flag_for(code)`,
//!   `name_for(code)`; any non-string argument counts as "no code"
//! - Listing: `all_countries()`, `search_countries(query)`, `get_country_count()`,
//!   `get_stats()`, `nationality_breakdown(counts)`
//! - `NationalityPicker`: the dropdown state machine plus an update flow
//!   around a JS function that returns a `Promise`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { flag_for, NationalityPicker } from 'nationality-wasm';
//!
//! async function main() {
//!   await init();
//!   console.log(flag_for('kr')); // 🇰🇷
//!
//!   const picker = new NationalityPicker(
//!     (code) => fetch('/api/profile', { method: 'PATCH', body: JSON.stringify({ nationality: code }) }),
//!     true,                                  // persist each commit immediately
//!     (code) => render(code),                // on change
//!     (err) => toast(`Could not save: ${err}`),
//!   );
//!   picker.open();
//!   picker.set_query('kor');
//!   picker.key('ArrowDown');
//!   picker.key('Enter');
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - One catalog/search cache is shared by every picker on the page.
//! - Pickers must be `unmount()`ed (or `free()`d) when their component goes
//!   away; late responses are then ignored.
use std::fmt;
use std::sync::{Arc, OnceLock};
use wasm_bindgen::prelude::*;

use futures::future::{self, FutureExt, LocalBoxFuture};
use nationality_core::prelude::{
    Immediate, NationalityBreakdown, NationalityDb, NationalityMutation, NationalitySearch,
    NationalitySelector, SelectorKey, SelectorOutcome, SubmitOutcome, UpdateFlow, UpdateStatus,
};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen_futures::{future_to_promise, JsFuture};

static DB: OnceLock<Arc<NationalityDb>> = OnceLock::new();

fn db() -> &'static Arc<NationalityDb> {
    DB.get_or_init(|| Arc::new(NationalityDb::builtin()))
}

/// JS strings become codes; `undefined`, `null`, numbers and objects do not.
fn code_arg(value: &JsValue) -> Option<String> {
    value.as_string()
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let stats = db().stats();
    web_sys::console::log_1(&format!("✓ Loaded {} nationalities", stats.countries).into());
}

/* --------------------------------------------------------------------------
   Lookups
-------------------------------------------------------------------------- */

/// The country for `code` (exact case), or the "Prefer not to say" entry.
#[wasm_bindgen]
pub fn resolve_country(code: JsValue) -> Result<JsValue, JsValue> {
    let code = code_arg(&code);
    Ok(to_value(db().resolve(code.as_deref()))?)
}

#[wasm_bindgen]
pub fn is_valid_code(code: JsValue) -> bool {
    db().is_valid(code_arg(&code).as_deref())
}

/// Flag glyph; lowercase codes are accepted.
#[wasm_bindgen]
pub fn flag_for(code: JsValue) -> String {
    db().flag_for(code_arg(&code).as_deref()).to_owned()
}

#[wasm_bindgen]
pub fn name_for(code: JsValue) -> String {
    db().name_for(code_arg(&code).as_deref()).to_owned()
}

/* --------------------------------------------------------------------------
   Listing & Search
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn search_countries(query: JsValue) -> Result<JsValue, JsValue> {
    let query = code_arg(&query);
    Ok(to_value(&db().search(query.as_deref()))?)
}

#[wasm_bindgen]
pub fn all_countries() -> Result<JsValue, JsValue> {
    Ok(to_value(db().countries())?)
}

#[wasm_bindgen]
pub fn get_country_count() -> usize {
    db().countries().len()
}

#[wasm_bindgen]
pub fn get_stats() -> Result<JsValue, JsValue> {
    Ok(to_value(&db().stats())?)
}

#[derive(Deserialize)]
struct VoteCount {
    code: Option<String>,
    count: u64,
}

/// Groups `[{ code, count }]` by nationality for the results view.
#[wasm_bindgen]
pub fn nationality_breakdown(counts: JsValue) -> Result<JsValue, JsValue> {
    let counts: Vec<VoteCount> = from_value(counts)?;
    let breakdown =
        NationalityBreakdown::from_counts(db(), counts.iter().map(|v| (v.code.as_deref(), v.count)));
    Ok(to_value(&breakdown)?)
}

/* --------------------------------------------------------------------------
   Update collaborator
-------------------------------------------------------------------------- */

/// Whatever the JS mutation threw or rejected with.
pub struct MutationError(JsValue);

impl MutationError {
    pub fn into_js(self) -> JsValue {
        self.0
    }
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.0.as_string() {
            return f.write_str(&text);
        }
        if let Some(err) = self.0.dyn_ref::<js_sys::Error>() {
            return f.write_str(&String::from(err.message()));
        }
        write!(f, "{:?}", self.0)
    }
}

/// Calls a JS function with the code (or `null`) and awaits the returned
/// value as a promise. A synchronous throw counts as a rejection.
struct JsMutation {
    func: js_sys::Function,
}

impl NationalityMutation for JsMutation {
    type Error = MutationError;

    fn mutate(&self, code: Option<String>) -> LocalBoxFuture<'static, Result<(), MutationError>> {
        let arg = code.map_or(JsValue::NULL, JsValue::from);
        let returned = match self.func.call1(&JsValue::NULL, &arg) {
            Ok(value) => value,
            Err(thrown) => return future::ready(Err(MutationError(thrown))).boxed_local(),
        };
        JsFuture::from(js_sys::Promise::resolve(&returned))
            .map(|settled| settled.map(|_| ()).map_err(MutationError))
            .boxed_local()
    }
}

/* --------------------------------------------------------------------------
   Picker
-------------------------------------------------------------------------- */

fn outcome(outcome: SelectorOutcome) -> Result<JsValue, JsValue> {
    Ok(to_value(&outcome)?)
}

#[wasm_bindgen]
pub struct NationalityPicker {
    selector: NationalitySelector,
    flow: UpdateFlow<JsMutation>,
}

#[wasm_bindgen]
impl NationalityPicker {
    /// `mutate(code)` persists a nationality and returns a promise.
    /// `on_change(code)` runs after the call that committed has returned.
    /// With `immediate`, every commit is persisted right away; otherwise
    /// call `submit()` from the surrounding form.
    #[wasm_bindgen(constructor)]
    pub fn new(
        mutate: js_sys::Function,
        immediate: bool,
        on_change: Option<js_sys::Function>,
        on_error: Option<js_sys::Function>,
    ) -> NationalityPicker {
        let flow = UpdateFlow::new(JsMutation { func: mutate }).with_error_handler(
            move |err: &MutationError| match &on_error {
                Some(callback) => {
                    if let Err(thrown) = callback.call1(&JsValue::NULL, &err.0) {
                        web_sys::console::error_2(&"nationality error handler threw".into(), &thrown);
                    }
                }
                None => web_sys::console::warn_1(
                    &format!("nationality update failed: {err}").into(),
                ),
            },
        );

        let db = Arc::clone(db());
        let selector = if immediate {
            let spawn = |task: LocalBoxFuture<'static, ()>| wasm_bindgen_futures::spawn_local(task);
            NationalitySelector::with_strategy(db, Immediate::new(flow.clone(), spawn))
        } else {
            NationalitySelector::new(db)
        };

        let selector = match on_change {
            // Delivered on the microtask queue, once the picker is no longer
            // borrowed, so the handler may read `state()` or `selected()`.
            Some(callback) => selector.on_change(move |code| {
                let callback = callback.clone();
                let arg = code.map_or(JsValue::NULL, JsValue::from_str);
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(thrown) = callback.call1(&JsValue::NULL, &arg) {
                        web_sys::console::error_2(&"nationality change handler threw".into(), &thrown);
                    }
                });
            }),
            None => selector,
        };

        NationalityPicker { selector, flow }
    }

    pub fn open(&mut self) -> Result<JsValue, JsValue> {
        outcome(self.selector.activate())
    }

    pub fn toggle(&mut self) -> Result<JsValue, JsValue> {
        outcome(self.selector.toggle())
    }

    pub fn close(&mut self) -> Result<JsValue, JsValue> {
        outcome(self.selector.escape())
    }

    pub fn blur(&mut self) -> Result<JsValue, JsValue> {
        outcome(self.selector.blur())
    }

    pub fn set_query(&mut self, text: &str) -> Result<JsValue, JsValue> {
        outcome(self.selector.set_query(text))
    }

    /// Feed a `KeyboardEvent.key` value (`ArrowDown`, `Enter`, `k`, ...).
    /// Keys the picker has no use for (`Tab`, `Shift`, `PageDown`, ...) are
    /// `Ignored`, so hosts can forward every keydown.
    pub fn key(&mut self, key: &str) -> Result<JsValue, JsValue> {
        match key.parse::<SelectorKey>() {
            Ok(key) => outcome(self.selector.handle_key(key)),
            Err(_) => outcome(SelectorOutcome::Ignored),
        }
    }

    pub fn click(&mut self, index: usize) -> Result<JsValue, JsValue> {
        outcome(self.selector.click(index))
    }

    /// `{ is_open, search_query, focused_index, selected_code, current_nationality }`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(self.selector.state())?)
    }

    pub fn results(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(&self.selector.filtered())?)
    }

    pub fn selected(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(self.selector.selected_country())?)
    }

    pub fn selected_code(&self) -> Option<String> {
        self.selector.selected_code().map(str::to_owned)
    }

    /// Seed from the loaded profile; non-strings and `"unknown"` clear it.
    pub fn set_current_nationality(&mut self, code: JsValue) {
        self.selector.set_current_nationality(code_arg(&code));
    }

    pub fn is_updating(&self) -> bool {
        self.flow.is_updating()
    }

    pub fn status(&self) -> String {
        match self.flow.status() {
            UpdateStatus::Idle => "idle".into(),
            UpdateStatus::Pending => "pending".into(),
            UpdateStatus::Succeeded => "succeeded".into(),
            UpdateStatus::Failed(message) => format!("failed: {message}"),
        }
    }

    /// Persist the current selection. Resolves to `"persisted"` or
    /// `"skipped"` (another update in flight); rejects with the mutation's
    /// error.
    pub fn submit(&self) -> js_sys::Promise {
        let pending = self.flow.submit(self.selector.selected_code());
        future_to_promise(async move {
            match pending.await {
                SubmitOutcome::Persisted => Ok(JsValue::from_str("persisted")),
                SubmitOutcome::Skipped => Ok(JsValue::from_str("skipped")),
                SubmitOutcome::Failed(err) => Err(err.into_js()),
            }
        })
    }

    /// The owning component is gone; responses arriving later are ignored.
    pub fn unmount(&self) {
        self.flow.unmount();
    }
}

impl Drop for NationalityPicker {
    fn drop(&mut self) {
        self.flow.unmount();
    }
}
