//! Ready-made form markup

use notice::{FieldName, DEFAULT_TITLE};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::NoticeForm;

const SUBMIT_LABEL: &str = "Wordを生成してダウンロード";
const SUBMITTING_LABEL: &str = "生成中…";

/// Build the notice form inside the element with id `root_id`
///
/// Each field gets a labelled input, the preview updates on every
/// keystroke, and the button submits to the default endpoint.
///
/// @param rootId - Id of the container element
/// @returns The NoticeForm driving the markup
#[wasm_bindgen]
pub fn mount(root_id: &str) -> Result<NoticeForm, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;
    let root = document
        .get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("No element with id '{root_id}'")))?;

    let form = NoticeForm::new();

    let heading = document.create_element("h1")?;
    heading.set_text_content(Some(DEFAULT_TITLE));
    root.append_child(&heading)?;

    let fields = document.create_element("div")?;
    fields.set_class_name("notice-fields");
    root.append_child(&fields)?;

    let preview = document.create_element("pre")?;
    preview.set_class_name("notice-preview");
    preview.set_text_content(Some(&form.preview()));

    for field in FieldName::ALL {
        let row = field_row(&document, &form, field, &preview)?;
        fields.append_child(&row)?;
    }

    let button: HtmlButtonElement = document.create_element("button")?.dyn_into()?;
    button.set_type("button");
    button.set_text_content(Some(SUBMIT_LABEL));
    root.append_child(&button)?;

    let error = document.create_element("p")?;
    error.set_class_name("notice-error");
    root.append_child(&error)?;
    root.append_child(&preview)?;

    let on_click = {
        let form = form.clone();
        let button = button.clone();
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            if form.loading() {
                return;
            }
            let form = form.clone();
            let button = button.clone();
            let error = error.clone();

            button.set_disabled(true);
            button.set_text_content(Some(SUBMITTING_LABEL));
            error.set_text_content(None);

            wasm_bindgen_futures::spawn_local(async move {
                let message = match form.submit(None).await {
                    Ok(_) => form.error(),
                    Err(err) => Some(crate::fetch::js_error_message(&err)),
                };
                error.set_text_content(message.as_deref());
                button.set_disabled(false);
                button.set_text_content(Some(SUBMIT_LABEL));
            });
        })
    };
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    Ok(form)
}

/// One labelled input bound to `field`
fn field_row(
    document: &Document,
    form: &NoticeForm,
    field: FieldName,
    preview: &Element,
) -> Result<Element, JsValue> {
    let row = document.create_element("label")?;
    row.set_class_name("notice-field");

    let caption = document.create_element("span")?;
    caption.set_text_content(Some(field.label()));
    row.append_child(&caption)?;

    let current = form.value(field.as_str())?;
    let input: HtmlElement = if field.is_multiline() {
        let area: HtmlTextAreaElement = document.create_element("textarea")?.dyn_into()?;
        area.set_rows(5);
        area.set_value(&current);
        area.unchecked_into()
    } else {
        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type("text");
        input.set_value(&current);
        input.unchecked_into()
    };
    input.set_attribute("name", field.as_str())?;
    row.append_child(&input)?;

    let on_input = {
        let form = form.clone();
        let preview = preview.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target() else {
                return;
            };
            let value = match target.dyn_ref::<HtmlTextAreaElement>() {
                Some(area) => area.value(),
                None => target
                    .dyn_ref::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default(),
            };
            if form.update(field.as_str(), &value).is_ok() {
                preview.set_text_content(Some(&form.preview()));
            }
        })
    };
    input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    Ok(row)
}
