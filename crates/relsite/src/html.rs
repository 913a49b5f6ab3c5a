//! Download-page fragment for a normalized release.

use std::fmt::Write;

use relsite_release::Release;

/// Escape text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Release line, notes link, source links and the binary table.
pub fn fragment(release: &Release) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_fragment(&mut out, release);
    out
}

fn write_fragment(out: &mut String, release: &Release) -> std::fmt::Result {
    writeln!(
        out,
        "<p>The latest release is {}, which was made on {}.</p>",
        escape(release.name()),
        escape(release.date())
    )?;
    writeln!(
        out,
        "<p><a href=\"{}\">Release notes.</a></p>",
        escape(release.html_url())
    )?;

    writeln!(out, "<h3>Source</h3>")?;
    writeln!(out, "<ul>")?;
    for artifact in release.source_artifacts() {
        writeln!(
            out,
            "  <li><a href=\"{}\">{}</a></li>",
            escape(&artifact.url),
            escape(&artifact.name)
        )?;
    }
    writeln!(out, "</ul>")?;

    writeln!(out, "<h3>Linux Packages</h3>")?;
    writeln!(out, "<table class=\"table\">")?;
    writeln!(
        out,
        "  <thead><tr><th>OS</th><th>Platform</th><th>File</th><th>Size</th></tr></thead>"
    )?;
    writeln!(out, "  <tbody>")?;
    for (os, asset) in release.binary_assets().iter() {
        writeln!(
            out,
            "    <tr><td>{}</td><td>{}</td><td><a href=\"{}\">{}</a></td><td>{}</td></tr>",
            escape(os),
            escape(&asset.cpu),
            escape(&asset.url),
            escape(&asset.name),
            escape(&asset.size)
        )?;
    }
    writeln!(out, "  </tbody>")?;
    writeln!(out, "</table>")
}
