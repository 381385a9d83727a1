//! HTML for the single page of the webapp.

use crate::domain::value_objects::{
    inference::ClassCounts,
    upload_result::{ImageResult, UploadResult},
};

const STYLESHEET: &str = "/style.css";

pub fn render_index(result: &UploadResult) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Camera Inference</title>
"#,
    );
    html.push_str(&format!(
        "    <link rel=\"stylesheet\" href=\"{}\">\n",
        STYLESHEET
    ));
    html.push_str(
        r#"</head>
<body>
    <main class="container">
        <h1>Camera Inference</h1>
        <section class="stream">
            <h2>Live stream</h2>
            <a href="/stream" target="_blank">Open camera stream</a>
        </section>
        <section class="upload">
            <h2>Upload an image</h2>
            <form action="/upload/image" method="post" enctype="multipart/form-data">
                <input type="file" name="image" accept="image/jpeg" required>
                <button type="submit">Process image</button>
            </form>
        </section>
        <section class="upload">
            <h2>Upload a video</h2>
            <form action="/upload/video" method="post" enctype="multipart/form-data">
                <input type="file" name="video" accept="video/mp4" required>
                <button type="submit">Process video</button>
            </form>
        </section>
"#,
    );

    if let Some(message) = result.message.as_deref() {
        html.push_str(&format!(
            "        <p class=\"message\">{}</p>\n",
            escape_html(message)
        ));
    }

    if let Some(image) = &result.image_result {
        html.push_str(&image_section(image));
    }

    if let Some(counts) = &result.class_counts {
        html.push_str(&class_counts_section(counts));
    }

    if let Some(video) = result.video_result.as_deref() {
        html.push_str(&format!(
            r#"        <section class="result">
            <h2>Processed video</h2>
            <video controls src="{}"></video>
        </section>
"#,
            escape_html(video)
        ));
    }

    html.push_str("    </main>\n</body>\n</html>\n");
    html
}

fn image_section(image: &ImageResult) -> String {
    let caption = image
        .output_image
        .as_deref()
        .map(|name| format!("            <p class=\"caption\">{}</p>\n", escape_html(name)))
        .unwrap_or_default();

    format!(
        r#"        <section class="result">
            <h2>Processed image</h2>
{}            <img src="data:image/jpeg;base64,{}" alt="Annotated image">
        </section>
"#,
        caption,
        escape_html(&image.image_data)
    )
}

fn class_counts_section(counts: &ClassCounts) -> String {
    if counts.is_empty() {
        return "        <section class=\"counts\">\n            <p>No objects detected.</p>\n        </section>\n"
            .to_string();
    }

    let rows = counts
        .iter()
        .map(|(label, count)| {
            format!(
                "                <tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(label),
                count
            )
        })
        .collect::<String>();

    format!(
        r#"        <section class="counts">
            <h2>Detected objects</h2>
            <table>
                <tr><th>Class</th><th>Count</th></tr>
{}            </table>
        </section>
"#,
        rows
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
