use std::fmt::Write;

use crate::board::ListView;
use crate::view::{TaskView, ALL_CATEGORIES};

const STYLE: &str = include_str!("../assets/style.css");

pub fn render_page(view: &ListView) -> String {
    let active = view.filter.as_deref().unwrap_or(ALL_CATEGORIES);
    let mut html = String::with_capacity(4096);

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>To-Do</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>To-Do</h1>\n");

    render_filter(&mut html, &view.categories, active);
    render_add_task(&mut html, &view.categories, active);
    render_add_category(&mut html, active);

    html.push_str("<ul>\n");
    if view.tasks.is_empty() {
        html.push_str("<li class=\"empty\">Nothing to do.</li>\n");
    }
    for task in &view.tasks {
        render_task(&mut html, task, active);
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

fn render_filter(html: &mut String, categories: &[String], active: &str) {
    html.push_str("<form method=\"get\" action=\"/\">\n<select name=\"category\">\n");
    let options = std::iter::once(ALL_CATEGORIES).chain(categories.iter().map(String::as_str));
    for name in options {
        let selected = if name == active { " selected" } else { "" };
        let _ = writeln!(
            html,
            "<option value=\"{0}\"{selected}>{0}</option>",
            escape(name)
        );
    }
    html.push_str("</select>\n<button type=\"submit\">Filter</button>\n</form>\n");
}

fn render_add_task(html: &mut String, categories: &[String], active: &str) {
    let preset = if active == ALL_CATEGORIES { "" } else { active };
    html.push_str("<form method=\"post\" action=\"/add\">\n");
    html.push_str("<input name=\"task\" placeholder=\"New task\" required>\n");
    html.push_str("<input type=\"datetime-local\" name=\"due\">\n");
    html.push_str("<input type=\"color\" name=\"color\" value=\"#6c757d\">\n");
    let _ = writeln!(
        html,
        "<input name=\"category\" list=\"categories\" placeholder=\"General\" value=\"{}\">",
        escape(preset)
    );
    html.push_str("<datalist id=\"categories\">\n");
    for name in categories {
        let _ = writeln!(html, "<option value=\"{}\">", escape(name));
    }
    html.push_str("</datalist>\n");
    render_return_filter(html, active);
    html.push_str("<button type=\"submit\">Add</button>\n</form>\n");
}

fn render_add_category(html: &mut String, active: &str) {
    html.push_str("<form method=\"post\" action=\"/categories\">\n");
    html.push_str("<input name=\"name\" placeholder=\"New category\" required>\n");
    render_return_filter(html, active);
    html.push_str("<button type=\"submit\">Add category</button>\n</form>\n");
}

fn render_return_filter(html: &mut String, active: &str) {
    if active != ALL_CATEGORIES {
        let _ = writeln!(
            html,
            "<input type=\"hidden\" name=\"filter\" value=\"{}\">",
            escape(active)
        );
    }
}

fn render_task(html: &mut String, task: &TaskView, active: &str) {
    let class = if task.done { " class=\"done\"" } else { "" };
    let back = filter_query(active);
    let _ = write!(
        html,
        "<li{class}><span class=\"swatch\" style=\"background:{}\"></span>\
         <span class=\"label\">{}</span><span class=\"category\">{}</span>",
        escape(&task.color),
        escape(&task.task),
        escape(&task.category),
    );
    if !task.due_text.is_empty() {
        let due_class = if task.overdue { "due overdue" } else { "due" };
        let _ = write!(
            html,
            "<span class=\"{due_class}\">{}</span>",
            escape(&task.due_text)
        );
    }
    if !task.done {
        let _ = write!(html, "<a href=\"/complete/{}{back}\">Done</a>", task.index);
    }
    let _ = writeln!(html, "<a href=\"/delete/{}{back}\">Delete</a></li>", task.index);
}

fn filter_query(active: &str) -> String {
    if active == ALL_CATEGORIES {
        String::new()
    } else {
        format!("?filter={}", urlencoding::encode(active))
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
