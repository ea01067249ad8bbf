//! 第三方登录按钮（Google Identity Services）
//!
//! 凭据回调通过 `initialize` 显式注册，由组件持有，卸载时随组件释放。
//! 身份库脚本在 `index.html` 中加载；未加载时按钮不显示，只记录警告。

use js_sys::{Object, Reflect};
use leptos::html::Div;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = initialize, catch)]
    fn gsi_initialize(config: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = renderButton, catch)]
    fn gsi_render_button(parent: &web_sys::HtmlElement, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = ["google", "accounts", "id"], js_name = cancel, catch)]
    fn gsi_cancel() -> Result<(), JsValue>;
}

fn set_field(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(drop)
}

/// 从回调参数 `{ credential }` 中取出 ID token
fn credential_of(response: &JsValue) -> Option<String> {
    Reflect::get(response, &JsValue::from_str("credential"))
        .ok()?
        .as_string()
        .filter(|token| !token.is_empty())
}

fn mount_button(
    parent: &web_sys::HtmlElement,
    client_id: &str,
    callback: &Closure<dyn Fn(JsValue)>,
) -> Result<(), JsValue> {
    let config = Object::new();
    set_field(&config, "client_id", &JsValue::from_str(client_id))?;
    set_field(&config, "callback", callback.as_ref())?;
    set_field(&config, "auto_select", &JsValue::FALSE)?;
    gsi_initialize(&config)?;

    let options = Object::new();
    set_field(&options, "theme", &JsValue::from_str("outline"))?;
    set_field(&options, "size", &JsValue::from_str("large"))?;
    set_field(&options, "text", &JsValue::from_str("continue_with"))?;
    set_field(&options, "width", &JsValue::from_f64(320.0))?;
    gsi_render_button(parent, &options)
}

#[component]
pub fn GoogleSignInButton(
    client_id: &'static str,
    /// 收到 ID token 时调用
    on_credential: Callback<String>,
) -> impl IntoView {
    let container = NodeRef::<Div>::new();
    let handler = StoredValue::new_local(None::<Closure<dyn Fn(JsValue)>>);

    Effect::new(move |_| {
        let Some(parent) = container.get() else {
            return;
        };
        let callback = Closure::<dyn Fn(JsValue)>::new(move |response: JsValue| {
            match credential_of(&response) {
                Some(token) => on_credential.run(token),
                None => log::warn!("sign-in widget returned no credential"),
            }
        });
        match mount_button(&parent, client_id, &callback) {
            Ok(()) => handler.set_value(Some(callback)),
            Err(err) => log::warn!("identity library unavailable: {:?}", err),
        }
    });

    on_cleanup(move || {
        if gsi_cancel().is_err() {
            log::debug!("identity library not loaded, nothing to cancel");
        }
    });

    view! { <div class="flex justify-center" node_ref=container></div> }
}
