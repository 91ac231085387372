// src/main.rs: devbench shell (Rust + Yew + WASM)
//
// Sidebar on the left, one panel per tool on the right. All panels stay
// mounted and inactive ones are hidden, so switching tools keeps their input.

use devbench::config::{Prefs, LS_KEY_PATH_HISTORY, LS_KEY_PREFS};
use devbench::tools::base64_codec::{self, Base64Alphabet};
use devbench::tools::hash::{self, ALGORITHMS};
use devbench::tools::json_format;
use devbench::tools::json_path::{self, PathHistory, EXAMPLES};
use devbench::tools::jwt;
use devbench::tools::timestamp::{self, DateFormat, UnitHint, Zone};
use devbench::tools::url_codec;
use devbench::tools::uuid_gen::{self, UuidVersion, MAX_BATCH};
use devbench::{ToolError, ToolKind, TOOLS};
use gloo_timers::callback::Interval;
use web_sys::{window, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Storage};
use yew::prelude::*;

async fn copy_to_clipboard(text: String) -> Result<(), String> {
    let w = window().ok_or("No window".to_string())?;
    let cb = w.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(cb.write_text(&text))
        .await
        .map_err(|_| "Clipboard write failed (requires HTTPS + user gesture in many browsers)".to_string())?;
    Ok(())
}

// ---------- local storage ----------

fn get_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn load_prefs() -> Prefs {
    let Some(st) = get_storage() else { return Prefs::default(); };
    let Ok(Some(s)) = st.get_item(LS_KEY_PREFS) else { return Prefs::default(); };
    Prefs::from_json(&s)
}

fn save_prefs(prefs: &Prefs) {
    let Some(st) = get_storage() else { return; };
    if st.set_item(LS_KEY_PREFS, &prefs.to_json()).is_err() {
        log::warn!("could not persist prefs");
    }
}

fn load_history() -> PathHistory {
    let Some(st) = get_storage() else { return PathHistory::default(); };
    let Ok(Some(s)) = st.get_item(LS_KEY_PATH_HISTORY) else { return PathHistory::default(); };
    PathHistory::from_json(&s)
}

fn save_history(history: &PathHistory) {
    let Some(st) = get_storage() else { return; };
    if st.set_item(LS_KEY_PATH_HISTORY, &history.to_json()).is_err() {
        log::warn!("could not persist path history");
    }
}

// ---------- status line ----------

#[derive(Clone, PartialEq, Default)]
enum Status {
    #[default]
    Idle,
    Ok(String),
    Info(String),
    Warn(String),
    Err(String),
}

fn fail(e: &ToolError) -> Status {
    log::debug!("{} rejected input: {e}", e.kind());
    Status::Err(format!("Error: {e}"))
}

fn status_view(s: &Status) -> Html {
    match s {
        Status::Idle => html! { <div class="smallnote">{ " " }</div> },
        Status::Ok(m) => html! { <div class="ok">{ format!("✅ {m}") }</div> },
        Status::Info(m) => html! { <div class="info">{ format!("ℹ️ {m}") }</div> },
        Status::Warn(m) => html! { <div class="warn">{ format!("⚠️ {m}") }</div> },
        Status::Err(m) => html! { <div class="alert">{ format!("❌ {m}") }</div> },
    }
}

// ---------- small wiring helpers ----------

fn bind_textarea(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlTextAreaElement>().value());
    })
}

fn bind_line(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        state.set(e.target_unchecked_into::<HtmlInputElement>().value());
    })
}

fn copy_button_cb(
    text: &UseStateHandle<String>,
    status: &UseStateHandle<Status>,
    what: &'static str,
) -> Callback<MouseEvent> {
    let text = text.clone();
    let status = status.clone();
    Callback::from(move |_| {
        let txt = (*text).clone();
        if txt.is_empty() {
            status.set(Status::Warn(format!("Nothing to copy yet ({what}).")));
            return;
        }
        let status2 = status.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match copy_to_clipboard(txt).await {
                Ok(_) => status2.set(Status::Ok(format!("Copied {what} to clipboard."))),
                Err(e) => status2.set(Status::Err(e)),
            }
        });
    })
}

fn clear_cb(fields: Vec<UseStateHandle<String>>, status: &UseStateHandle<Status>) -> Callback<MouseEvent> {
    let status = status.clone();
    Callback::from(move |_| {
        for f in &fields {
            f.set(String::new());
        }
        status.set(Status::Idle);
    })
}

fn swap_cb(
    input: &UseStateHandle<String>,
    output: &UseStateHandle<String>,
    status: &UseStateHandle<Status>,
) -> Callback<MouseEvent> {
    let input = input.clone();
    let output = output.clone();
    let status = status.clone();
    Callback::from(move |_| {
        if output.is_empty() {
            return;
        }
        input.set((*output).clone());
        output.set(String::new());
        status.set(Status::Info("Moved output to input.".to_string()));
    })
}

fn toggle_label(name: &str, on: bool) -> String {
    format!("{name}: {}", if on { "ON" } else { "OFF" })
}

#[derive(Properties, PartialEq)]
struct ToolProps {
    prefs: Prefs,
    on_prefs: Callback<Prefs>,
}

/// Emits a copy of `prefs` with `edit` applied.
fn edit_prefs(props: &ToolProps, edit: impl Fn(&mut Prefs) + 'static) -> Callback<MouseEvent> {
    let prefs = props.prefs.clone();
    let on_prefs = props.on_prefs.clone();
    Callback::from(move |_| {
        let mut p = prefs.clone();
        edit(&mut p);
        on_prefs.emit(p);
    })
}

fn tool_header(kind: ToolKind) -> Html {
    html! {
        <div class="tool-head">
          <h2>{ kind.label() }</h2>
          <div class="smallnote">{ kind.blurb() }</div>
        </div>
    }
}

/* ---------- JSON formatter ---------- */

#[function_component(JsonView)]
fn json_view(props: &ToolProps) -> Html {
    let input = use_state(String::new);
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let opts = props.prefs.json;

    let on_format = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.trim().is_empty() {
                status.set(Status::Warn("Please enter JSON data".to_string()));
                return;
            }
            match json_format::pretty(&input, &opts) {
                Ok(s) => {
                    output.set(s);
                    status.set(Status::Ok("JSON formatted successfully".to_string()));
                }
                Err(e) => {
                    output.set(String::new());
                    status.set(fail(&e));
                }
            }
        })
    };

    let on_minify = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.trim().is_empty() {
                status.set(Status::Warn("Please enter JSON data".to_string()));
                return;
            }
            match json_format::minify(&input) {
                Ok(s) => {
                    output.set(s);
                    status.set(Status::Ok("JSON minified successfully".to_string()));
                }
                Err(e) => {
                    output.set(String::new());
                    status.set(fail(&e));
                }
            }
        })
    };

    let on_sort = edit_prefs(props, |p| p.json.sort_keys = !p.json.sort_keys);
    let on_indent = edit_prefs(props, |p| p.json.indent = if p.json.indent == 2 { 4 } else { 2 });

    html! {
        <div class="panel">
          { tool_header(ToolKind::JsonFormatter) }
          <div class="panel two-col">
            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Input JSON" }</div>
                <div class="btnrow">
                  <button class="btn" onclick={on_format}>{ "Format →" }</button>
                  <button class="btn" onclick={on_minify}>{ "Minify →" }</button>
                  <button class="btn" onclick={swap_cb(&input, &output, &status)}>{ "Swap" }</button>
                  <button class="btn danger" onclick={clear_cb(vec![input.clone(), output.clone()], &status)}>{ "Clear" }</button>
                </div>
              </div>
              <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="Paste your JSON here..." />
              <div class="btnrow">
                <button class="btn ghost" onclick={on_sort}>{ toggle_label("Sort keys", opts.sort_keys) }</button>
                <button class="btn ghost" onclick={on_indent}>{ format!("Indent: {} spaces", opts.indent) }</button>
              </div>
            </div>

            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Output" }</div>
                <div class="btnrow">
                  <button class="btn ok" onclick={copy_button_cb(&output, &status, "output")}>{ "Copy" }</button>
                </div>
              </div>
              <textarea readonly=true value={(*output).clone()} placeholder="Formatted / minified result shows here" />
            </div>
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- JSON path filter ---------- */

#[function_component(JsonPathView)]
fn json_path_view() -> Html {
    let input = use_state(String::new);
    let expr = use_state(String::new);
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let history = use_state(load_history);

    let on_apply = {
        let (input, expr, output, status, history) =
            (input.clone(), expr.clone(), output.clone(), status.clone(), history.clone());
        Callback::from(move |_: MouseEvent| {
            if input.trim().is_empty() {
                status.set(Status::Warn("Please enter JSON data".to_string()));
                return;
            }
            if expr.trim().is_empty() {
                status.set(Status::Warn("Please enter a JSONPath expression".to_string()));
                return;
            }
            match json_path::filter(&input, &expr) {
                Ok(found) => {
                    output.set(found.render());
                    if found.is_empty() {
                        status.set(Status::Info(found.summary()));
                    } else {
                        status.set(Status::Ok(found.summary()));
                        let mut h = (*history).clone();
                        h.record(&expr);
                        save_history(&h);
                        history.set(h);
                    }
                }
                Err(e) => {
                    output.set(String::new());
                    status.set(fail(&e));
                }
            }
        })
    };

    let on_history = {
        let expr = expr.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlSelectElement>().value();
            if !v.is_empty() {
                expr.set(v);
            }
        })
    };

    html! {
        <div class="panel">
          { tool_header(ToolKind::JsonPath) }
          <div class="block">
            <div class="block-head"><div class="block-title">{ "Input JSON" }</div></div>
            <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="Paste your JSON here..." />
          </div>

          <div class="block">
            <div class="block-head">
              <div class="block-title">{ "JSONPath Expression" }</div>
              <div class="btnrow">
                <button class="btn" onclick={on_apply.clone()}>{ "Apply Filter" }</button>
                <button class="btn ok" onclick={copy_button_cb(&output, &status, "result")}>{ "Copy Result" }</button>
                <button class="btn danger" onclick={clear_cb(vec![input.clone(), expr.clone(), output.clone()], &status)}>{ "Clear" }</button>
              </div>
            </div>
            <div class="textline">
              <input type="text" value={(*expr).clone()} oninput={bind_line(&expr)} placeholder="$" />
            </div>
            <div class="kv">
              { for EXAMPLES.iter().map(|(ex, desc)| {
                  let expr = expr.clone();
                  let status = status.clone();
                  let ex = *ex;
                  html! {
                    <button class="tag" title={*desc} onclick={Callback::from(move |_| {
                        expr.set(ex.to_string());
                        status.set(Status::Info(format!("Example loaded: {ex}")));
                    })}>{ ex }</button>
                  }
              })}
            </div>
            <select onchange={on_history}>
              <option value="" selected=true>{ "-- Select recent expression --" }</option>
              { for history.entries().iter().map(|h| html! { <option value={h.clone()}>{ h.clone() }</option> }) }
            </select>
          </div>

          <div class="block">
            <div class="block-head"><div class="block-title">{ "Filtered Result" }</div></div>
            <pre class="diff">{ (*output).clone() }</pre>
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- Base64 ---------- */

#[function_component(Base64View)]
fn base64_view(props: &ToolProps) -> Html {
    let input = use_state(String::new);
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let alphabet = props.prefs.base64_alphabet;

    let on_encode = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            output.set(base64_codec::encode(input.as_bytes(), alphabet));
            status.set(Status::Ok("Encoded OK.".to_string()));
        })
    };

    let on_decode = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| match base64_codec::decode_to_text(&input, alphabet) {
            Ok(s) => {
                output.set(s);
                status.set(Status::Ok("Decoded OK.".to_string()));
            }
            Err(e) => {
                output.set(String::new());
                status.set(fail(&e));
            }
        })
    };

    let on_alphabet = edit_prefs(props, |p| {
        p.base64_alphabet = match p.base64_alphabet {
            Base64Alphabet::Standard => Base64Alphabet::UrlSafe,
            Base64Alphabet::UrlSafe => Base64Alphabet::Standard,
        }
    });

    html! {
        <div class="panel">
          { tool_header(ToolKind::Base64) }
          <div class="panel two-col">
            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Input" }</div>
                <div class="btnrow">
                  <button class="btn" onclick={on_encode}>{ "Encode →" }</button>
                  <button class="btn" onclick={on_decode}>{ "Decode →" }</button>
                  <button class="btn ghost" onclick={on_alphabet}>{ format!("Alphabet: {}", alphabet.label()) }</button>
                </div>
              </div>
              <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="Text or base64 here" />
            </div>

            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Output" }</div>
                <div class="btnrow">
                  <button class="btn" onclick={swap_cb(&input, &output, &status)}>{ "Swap" }</button>
                  <button class="btn ok" onclick={copy_button_cb(&output, &status, "output")}>{ "Copy" }</button>
                  <button class="btn danger" onclick={clear_cb(vec![input.clone(), output.clone()], &status)}>{ "Clear" }</button>
                </div>
              </div>
              <textarea readonly=true value={(*output).clone()} placeholder="Result shows here" />
            </div>
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- UUID ---------- */

#[function_component(UuidView)]
fn uuid_view(props: &ToolProps) -> Html {
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let version = props.prefs.uuid_version;
    let quantity = props.prefs.uuid_quantity;
    let fmt = props.prefs.uuid_format;

    let on_generate = {
        let (output, status) = (output.clone(), status.clone());
        Callback::from(move |_| {
            let ids = uuid_gen::generate_batch(version, quantity, fmt);
            let n = ids.len();
            output.set(ids.join("\n"));
            status.set(Status::Ok(format!(
                "Generated {n} UUID {}{}",
                version.label(),
                if n > 1 { "(s)" } else { "" }
            )));
        })
    };

    let on_version = edit_prefs(props, |p| {
        p.uuid_version = match p.uuid_version {
            UuidVersion::V4 => UuidVersion::V7,
            UuidVersion::V7 => UuidVersion::V4,
        }
    });
    let on_upper = edit_prefs(props, |p| p.uuid_format.uppercase = !p.uuid_format.uppercase);
    let on_hyphens = edit_prefs(props, |p| p.uuid_format.hyphens = !p.uuid_format.hyphens);

    let on_quantity = {
        let prefs = props.prefs.clone();
        let on_prefs = props.on_prefs.clone();
        Callback::from(move |e: InputEvent| {
            let raw = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Ok(n) = raw.trim().parse::<usize>() {
                let mut p = prefs.clone();
                p.uuid_quantity = n.clamp(1, MAX_BATCH);
                on_prefs.emit(p);
            }
        })
    };

    html! {
        <div class="panel">
          { tool_header(ToolKind::Uuid) }
          <div class="block">
            <div class="block-head">
              <div class="block-title">{ "Options" }</div>
              <div class="btnrow">
                <button class="btn ghost" onclick={on_version}>{ format!("Version: {}", version.label()) }</button>
                <button class="btn ghost" onclick={on_upper}>{ toggle_label("Uppercase", fmt.uppercase) }</button>
                <button class="btn ghost" onclick={on_hyphens}>{ toggle_label("Hyphens", fmt.hyphens) }</button>
              </div>
            </div>
            <div class="textline">
              <label>{ "Quantity" }</label>
              <input type="number" min="1" max={MAX_BATCH.to_string()} value={quantity.to_string()} oninput={on_quantity} />
            </div>
            <div class="btnrow">
              <button class="btn" onclick={on_generate}>{ "Generate" }</button>
              <button class="btn ok" onclick={copy_button_cb(&output, &status, "UUIDs")}>{ "Copy All" }</button>
              <button class="btn danger" onclick={clear_cb(vec![output.clone()], &status)}>{ "Clear" }</button>
            </div>
            <textarea readonly=true value={(*output).clone()} placeholder="Click Generate" />
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- JWT ---------- */

#[function_component(JwtView)]
fn jwt_view() -> Html {
    let input = use_state(String::new);
    let header = use_state(String::new);
    let payload = use_state(String::new);
    let signature = use_state(String::new);
    let claims = use_state(Vec::<(&'static str, String)>::new);
    let status = use_state(Status::default);

    let on_decode = {
        let (input, header, payload, signature, claims, status) = (
            input.clone(),
            header.clone(),
            payload.clone(),
            signature.clone(),
            claims.clone(),
            status.clone(),
        );
        Callback::from(move |_| {
            if input.trim().is_empty() {
                status.set(Status::Warn("Please enter a JWT token".to_string()));
                return;
            }
            match jwt::decode(&input) {
                Ok(t) => {
                    header.set(t.header_pretty());
                    payload.set(t.payload_pretty());
                    signature.set(t.signature.clone());
                    claims.set(t.claims().rows());
                    status.set(Status::Ok("JWT decoded (signature not verified)".to_string()));
                }
                Err(e) => status.set(fail(&e)),
            }
        })
    };

    let on_clear = {
        let clear_text = clear_cb(
            vec![input.clone(), header.clone(), payload.clone(), signature.clone()],
            &status,
        );
        let claims = claims.clone();
        Callback::from(move |e: MouseEvent| {
            claims.set(Vec::new());
            clear_text.emit(e);
        })
    };

    html! {
        <div class="panel">
          { tool_header(ToolKind::Jwt) }
          <div class="block">
            <div class="block-head">
              <div class="block-title">{ "JWT (paste token)" }</div>
              <div class="btnrow">
                <button class="btn" onclick={on_decode}>{ "Decode" }</button>
                <button class="btn danger" onclick={on_clear}>{ "Clear" }</button>
              </div>
            </div>
            <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="header.payload.signature" />
          </div>

          <div class="panel two-col">
            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Header" }</div>
                <div class="btnrow">
                  <button class="btn ok" onclick={copy_button_cb(&header, &status, "header")}>{ "Copy" }</button>
                </div>
              </div>
              <textarea readonly=true value={(*header).clone()} placeholder="Decoded header" />
            </div>

            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Payload" }</div>
                <div class="btnrow">
                  <button class="btn ok" onclick={copy_button_cb(&payload, &status, "payload")}>{ "Copy" }</button>
                </div>
              </div>
              <textarea readonly=true value={(*payload).clone()} placeholder="Decoded payload" />
            </div>
          </div>

          <div class="block">
            <div class="block-head"><div class="block-title">{ "Signature (raw)" }</div></div>
            <pre class="diff">{ (*signature).clone() }</pre>
          </div>

          <div class="block">
            <div class="block-head"><div class="block-title">{ "Token Information" }</div></div>
            if claims.is_empty() {
              <div class="smallnote">{ "No token decoded yet" }</div>
            } else {
              <dl class="claims">
                { for claims.iter().map(|(k, v)| html! {
                    <>
                      <dt>{ *k }</dt>
                      <dd>{ v.clone() }</dd>
                    </>
                })}
              </dl>
            }
          </div>

          { status_view(&status) }
          <div class="smallnote">{ "Note: this decodes base64url only; signatures are never verified." }</div>
        </div>
    }
}

/* ---------- URL ---------- */

#[function_component(UrlView)]
fn url_view(props: &ToolProps) -> Html {
    let input = use_state(String::new);
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let plus = props.prefs.url_plus_for_space;

    let on_encode = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.is_empty() {
                status.set(Status::Warn("Please enter text to convert".to_string()));
                return;
            }
            let encoded = url_codec::encode(&input, plus);
            status.set(Status::Ok(format!(
                "Encoded {} chars → {} chars",
                input.chars().count(),
                encoded.chars().count()
            )));
            output.set(encoded);
        })
    };

    let on_decode = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.is_empty() {
                status.set(Status::Warn("Please enter text to convert".to_string()));
                return;
            }
            match url_codec::decode(&input, plus) {
                Ok(decoded) => {
                    status.set(Status::Ok(format!(
                        "Decoded {} chars → {} chars",
                        input.chars().count(),
                        decoded.chars().count()
                    )));
                    output.set(decoded);
                }
                Err(e) => {
                    output.set(String::new());
                    status.set(fail(&e));
                }
            }
        })
    };

    let on_plus = edit_prefs(props, |p| p.url_plus_for_space = !p.url_plus_for_space);

    html! {
        <div class="panel">
          { tool_header(ToolKind::Url) }
          <div class="panel two-col">
            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Input" }</div>
                <div class="btnrow">
                  <button class="btn" onclick={on_encode}>{ "Encode →" }</button>
                  <button class="btn" onclick={on_decode}>{ "Decode →" }</button>
                  <button class="btn ghost" onclick={on_plus}>{ toggle_label("'+' for spaces", plus) }</button>
                </div>
              </div>
              <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="https://example.com?q=hello world&x=1" />
            </div>

            <div class="block">
              <div class="block-head">
                <div class="block-title">{ "Output" }</div>
                <div class="btnrow">
                  <button class="btn" onclick={swap_cb(&input, &output, &status)}>{ "Swap" }</button>
                  <button class="btn ok" onclick={copy_button_cb(&output, &status, "output")}>{ "Copy" }</button>
                  <button class="btn danger" onclick={clear_cb(vec![input.clone(), output.clone()], &status)}>{ "Clear" }</button>
                </div>
              </div>
              <textarea readonly=true value={(*output).clone()} placeholder="Result shows here" />
            </div>
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- Timestamp ---------- */

#[derive(Clone, Copy, PartialEq, Eq)]
enum TsMode {
    ToDate,
    ToEpoch,
}

fn unit_hint_value(u: UnitHint) -> &'static str {
    match u {
        UnitHint::Auto => "auto",
        UnitHint::Seconds => "s",
        UnitHint::Milliseconds => "ms",
    }
}

fn format_value(f: DateFormat) -> &'static str {
    match f {
        DateFormat::Iso8601 => "iso",
        DateFormat::Rfc2822 => "rfc2822",
        DateFormat::Human => "human",
    }
}

#[function_component(TimestampView)]
fn timestamp_view(props: &ToolProps) -> Html {
    let mode = use_state(|| TsMode::ToDate);
    let input = use_state(String::new);
    let output = use_state(String::new);
    let zone_text = use_state(|| props.prefs.ts_zone.label());
    let status = use_state(Status::default);
    let now = use_state(timestamp::now_epoch);

    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let tick = Interval::new(1000, move || now.set(timestamp::now_epoch()));
            move || drop(tick)
        });
    }

    let unit = props.prefs.ts_unit;
    let format = props.prefs.ts_format;

    let on_convert = {
        let (mode, input, output, zone_text, status) =
            (mode.clone(), input.clone(), output.clone(), zone_text.clone(), status.clone());
        let prefs = props.prefs.clone();
        let on_prefs = props.on_prefs.clone();
        Callback::from(move |_| {
            if input.trim().is_empty() {
                status.set(Status::Warn("Please enter a value to convert".to_string()));
                return;
            }
            let zone = match Zone::parse(&zone_text) {
                Ok(z) => z,
                Err(e) => {
                    status.set(fail(&e));
                    return;
                }
            };
            if zone != prefs.ts_zone {
                let mut p = prefs.clone();
                p.ts_zone = zone;
                on_prefs.emit(p);
            }
            let result = match *mode {
                TsMode::ToDate => timestamp::epoch_to_date(&input, unit, zone, format)
                    .map(|r| (r.report(&input), "Converted timestamp to date")),
                TsMode::ToEpoch => timestamp::date_to_epoch(&input, zone)
                    .map(|r| (r.report(&input), "Converted date to timestamp")),
            };
            match result {
                Ok((text, msg)) => {
                    output.set(text);
                    status.set(Status::Ok(msg.to_string()));
                }
                Err(e) => {
                    output.set(String::new());
                    status.set(fail(&e));
                }
            }
        })
    };

    let on_now = {
        let (mode, input) = (mode.clone(), input.clone());
        Callback::from(move |_| {
            let (secs, _) = timestamp::now_epoch();
            match *mode {
                TsMode::ToDate => input.set(secs.to_string()),
                TsMode::ToEpoch => input.set(
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                ),
            }
        })
    };

    let on_mode = {
        let mode = mode.clone();
        Callback::from(move |_| {
            mode.set(match *mode {
                TsMode::ToDate => TsMode::ToEpoch,
                TsMode::ToEpoch => TsMode::ToDate,
            })
        })
    };

    let on_unit = {
        let prefs = props.prefs.clone();
        let on_prefs = props.on_prefs.clone();
        Callback::from(move |e: Event| {
            let mut p = prefs.clone();
            p.ts_unit = match e.target_unchecked_into::<HtmlSelectElement>().value().as_str() {
                "s" => UnitHint::Seconds,
                "ms" => UnitHint::Milliseconds,
                _ => UnitHint::Auto,
            };
            on_prefs.emit(p);
        })
    };

    let on_format = {
        let prefs = props.prefs.clone();
        let on_prefs = props.on_prefs.clone();
        Callback::from(move |e: Event| {
            let mut p = prefs.clone();
            p.ts_format = match e.target_unchecked_into::<HtmlSelectElement>().value().as_str() {
                "rfc2822" => DateFormat::Rfc2822,
                "human" => DateFormat::Human,
                _ => DateFormat::Iso8601,
            };
            on_prefs.emit(p);
        })
    };

    let (now_s, now_ms) = *now;
    let to_date = *mode == TsMode::ToDate;

    html! {
        <div class="panel">
          { tool_header(ToolKind::Timestamp) }
          <div class="block current">
            <div class="block-title">{ "Current Timestamp" }</div>
            <div class="mono">{ format!("Seconds: {now_s} | Milliseconds: {now_ms}") }</div>
          </div>

          <div class="block">
            <div class="block-head">
              <div class="block-title">{ if to_date { "Timestamp → Date" } else { "Date → Timestamp" } }</div>
              <div class="btnrow">
                <button class="btn ghost" onclick={on_mode}>{ "Switch direction" }</button>
                <button class="btn ghost" onclick={on_now}>{ "Now" }</button>
              </div>
            </div>
            <div class="textline">
              <input
                type="text"
                value={(*input).clone()}
                oninput={bind_line(&input)}
                placeholder={if to_date { "1700000000" } else { "2024-01-15 14:30:00" }}
              />
            </div>
            <div class="btnrow">
              <label>{ "Zone" }</label>
              <input type="text" class="short" value={(*zone_text).clone()} oninput={bind_line(&zone_text)} placeholder="UTC, local, +05:30" />
              if to_date {
                <>
                <label>{ "Unit" }</label>
                <select onchange={on_unit}>
                  { for [UnitHint::Auto, UnitHint::Seconds, UnitHint::Milliseconds].into_iter().map(|u| html! {
                      <option value={unit_hint_value(u)} selected={u == unit}>{ format!("{u:?}") }</option>
                  })}
                </select>
                <label>{ "Format" }</label>
                <select onchange={on_format}>
                  { for [DateFormat::Iso8601, DateFormat::Rfc2822, DateFormat::Human].into_iter().map(|f| html! {
                      <option value={format_value(f)} selected={f == format}>{ f.label() }</option>
                  })}
                </select>
                </>
              }
            </div>
            <div class="btnrow">
              <button class="btn" onclick={on_convert}>{ "Convert" }</button>
              <button class="btn ok" onclick={copy_button_cb(&output, &status, "result")}>{ "Copy" }</button>
              <button class="btn danger" onclick={clear_cb(vec![input.clone(), output.clone()], &status)}>{ "Clear" }</button>
            </div>
          </div>

          <div class="block">
            <div class="block-head"><div class="block-title">{ "Result" }</div></div>
            <pre class="diff">{ (*output).clone() }</pre>
          </div>
          { status_view(&status) }
        </div>
    }
}

/* ---------- Hash ---------- */

#[function_component(HashView)]
fn hash_view(props: &ToolProps) -> Html {
    let input = use_state(String::new);
    let output = use_state(String::new);
    let status = use_state(Status::default);
    let algo = props.prefs.hash_algorithm;

    let on_generate = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.is_empty() {
                status.set(Status::Warn("Please enter text to hash".to_string()));
                return;
            }
            let hex = hash::digest_hex(algo, input.as_bytes());
            status.set(Status::Ok(format!(
                "{algo} hash generated ({} chars → {} chars)",
                input.chars().count(),
                hex.len()
            )));
            output.set(hex);
        })
    };

    let on_all = {
        let (input, output, status) = (input.clone(), output.clone(), status.clone());
        Callback::from(move |_| {
            if input.is_empty() {
                status.set(Status::Warn("Please enter text to hash".to_string()));
                return;
            }
            let lines: Vec<String> = hash::digest_all(input.as_bytes())
                .into_iter()
                .map(|(a, h)| format!("{:<7}{h}", a.label()))
                .collect();
            output.set(lines.join("\n"));
            status.set(Status::Ok("Computed every digest.".to_string()));
        })
    };

    html! {
        <div class="panel">
          { tool_header(ToolKind::Hash) }
          <div class="block">
            <div class="block-head">
              <div class="block-title">{ "Input Text" }</div>
              <div class="btnrow">
                { for ALGORITHMS.iter().map(|a| {
                    let a = *a;
                    let pick = edit_prefs(props, move |p: &mut Prefs| p.hash_algorithm = a);
                    html! {
                      <button class={classes!("btn", "ghost", (a == algo).then_some("active"))} onclick={pick}>
                        { a.label() }
                      </button>
                    }
                })}
              </div>
            </div>
            <textarea value={(*input).clone()} oninput={bind_textarea(&input)} placeholder="Enter text to hash..." />
            <div class="btnrow">
              <button class="btn" onclick={on_generate}>{ "Generate Hash" }</button>
              <button class="btn" onclick={on_all}>{ "All Algorithms" }</button>
              <button class="btn ok" onclick={copy_button_cb(&output, &status, "hash")}>{ "Copy" }</button>
              <button class="btn danger" onclick={clear_cb(vec![input.clone(), output.clone()], &status)}>{ "Clear" }</button>
            </div>
          </div>
          <div class="block">
            <div class="block-head"><div class="block-title">{ "Hash" }</div></div>
            <pre class="diff">{ (*output).clone() }</pre>
          </div>
          { status_view(&status) }
          <div class="smallnote">{ "MD5 and SHA1 are for checksums and legacy parity only; prefer SHA256+ elsewhere." }</div>
        </div>
    }
}

/* ---------- shell ---------- */

fn tool_panel(kind: ToolKind, prefs: &Prefs, on_prefs: &Callback<Prefs>) -> Html {
    let prefs = prefs.clone();
    let on_prefs = on_prefs.clone();
    match kind {
        ToolKind::JsonFormatter => html! { <JsonView {prefs} {on_prefs} /> },
        ToolKind::JsonPath => html! { <JsonPathView /> },
        ToolKind::Base64 => html! { <Base64View {prefs} {on_prefs} /> },
        ToolKind::Uuid => html! { <UuidView {prefs} {on_prefs} /> },
        ToolKind::Jwt => html! { <JwtView /> },
        ToolKind::Url => html! { <UrlView {prefs} {on_prefs} /> },
        ToolKind::Timestamp => html! { <TimestampView {prefs} {on_prefs} /> },
        ToolKind::Hash => html! { <HashView {prefs} {on_prefs} /> },
    }
}

#[function_component(App)]
fn app() -> Html {
    let prefs = use_state(load_prefs);
    let active = use_state(|| prefs.last_tool());

    let on_prefs = {
        let prefs = prefs.clone();
        Callback::from(move |p: Prefs| {
            save_prefs(&p);
            prefs.set(p);
        })
    };

    let select_tool = {
        let active = active.clone();
        let prefs = prefs.clone();
        let on_prefs = on_prefs.clone();
        Callback::from(move |t: ToolKind| {
            log::debug!("switching to {}", t.label());
            active.set(t);
            let mut p = (*prefs).clone();
            p.last_tool = t.label().to_string();
            on_prefs.emit(p);
        })
    };

    html! {
      <div class="app">
        <nav class="sidebar" aria-label="Developer tools">
          <div class="sidebar-head">{ "DEVELOPER TOOLS" }</div>
          { for TOOLS.iter().copied().map(|t| {
              let is_active = *active == t;
              let select_tool = select_tool.clone();
              html! {
                <button
                  class={classes!("side-item", is_active.then_some("active"))}
                  aria-current={is_active.then_some("page")}
                  onclick={Callback::from(move |_| select_tool.emit(t))}
                >
                  { t.label() }
                </button>
              }
          })}
        </nav>

        <main class="content">
          { for TOOLS.iter().copied().map(|t| html! {
              <section class="tool" hidden={*active != t}>
                { tool_panel(t, &prefs, &on_prefs) }
              </section>
          })}
        </main>
      </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("devbench starting with {} tools", TOOLS.len());

    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("app"));
    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            yew::Renderer::<App>::new().render();
        }
    }
}
