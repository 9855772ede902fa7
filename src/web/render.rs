use axum::response::Html;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Renders the form page, with the prediction block filled in when there is one.
pub fn index_page(prediction: Option<i32>) -> Html<String> {
    let block = match prediction {
        Some(label) => format!(
            r#"<p class="result">Prediction: <strong id="prediction">{}</strong></p>"#,
            label
        ),
        None => String::new(),
    };
    Html(INDEX_TEMPLATE.replace("{{prediction}}", &block))
}
