use kanal::AsyncReceiver;
use quickdef_types::{AppEvent, Response};

/// Prints responses as they arrive until the backend reports `InputClosed`
pub async fn ui_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, json: bool) -> anyhow::Result<()> {
    loop {
        match app_to_ui_rx.recv().await {
            Ok(AppEvent::Response { word, response }) => {
                println!("{}", render_response(&word, &response, json)?);
            }
            Ok(AppEvent::InputClosed) | Err(_) => break,
            Ok(_) => {}
        }
    }
    Ok(())
}

pub fn render_response(word: &str, response: &Response, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string(response)?);
    }

    let word = word.trim();
    let mut out = String::new();

    if let Some(error) = &response.error {
        out.push_str(&format!("{word}: {error}"));
        return Ok(out);
    }

    if let Some(data) = &response.data {
        out.push_str(word);
        out.push_str(&format!("\n  {}", data.definition));
        if let Some(example) = &data.example {
            out.push_str(&format!("\n  Example: \"{example}\""));
        }
        if !data.synonyms.is_empty() {
            out.push_str(&format!("\n  Synonyms: {}", data.synonyms.join(", ")));
        }
    }

    if let Some(explanation) = &response.explanation {
        out.push_str(&format!("{word} (explained simply)\n  {explanation}"));
    }

    Ok(out)
}
