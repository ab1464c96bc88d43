// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A static HTML page listing the rendered demos.

use std::fmt::Write as _;

/// One rendered demo.
#[derive(Debug)]
pub(crate) struct Section {
    pub(crate) title: &'static str,
    pub(crate) note: &'static str,
    pub(crate) file: String,
}

pub(crate) fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<!doctype html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>{}</title>", escape(title));
    let _ = writeln!(
        out,
        "<style>body{{font-family:sans-serif;margin:24px}}\
         section{{display:inline-block;vertical-align:top;margin:0 24px 24px 0}}\
         img{{border:1px solid #ddd}}</style></head><body>"
    );
    let _ = writeln!(out, "<h1>{}</h1>", escape(title));
    for s in sections {
        let _ = writeln!(
            out,
            "<section><h2>{}</h2><p>{}</p><img src=\"{}\"></section>",
            escape(s.title),
            escape(s.note),
            escape(&s.file)
        );
    }
    let _ = writeln!(out, "</body></html>");
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
