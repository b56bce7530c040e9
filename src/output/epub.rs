//! EPUB packaging
//!
//! Writes a [`Book`] as an EPUB 3 archive with EPUB 2 NCX compatibility:
//! stored `mimetype` entry first, then `META-INF/container.xml`, the OPF
//! package document, the navigation documents, and one XHTML file per chapter.
//! The spine lists the navigation page first, then chapters in input order;
//! the table of contents mirrors the spine.

use crate::output::book::{Book, BookChapter};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors produced while packaging the EPUB
#[derive(Debug, Error)]
pub enum EpubError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Writes `book` as an EPUB file at `path`
pub fn write_epub(book: &Book, path: &Path) -> Result<(), EpubError> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);

    // The mimetype entry must be first and uncompressed.
    let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored)?;
    zip.write_all(b"application/epub+zip")?;

    let deflated = FileOptions::default();
    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    zip.start_file("OEBPS/content.opf", deflated)?;
    zip.write_all(render_opf(book).as_bytes())?;

    zip.start_file("OEBPS/nav.xhtml", deflated)?;
    zip.write_all(render_nav(book).as_bytes())?;

    zip.start_file("OEBPS/toc.ncx", deflated)?;
    zip.write_all(render_ncx(book).as_bytes())?;

    for chapter in &book.chapters {
        zip.start_file(format!("OEBPS/{}", chapter.file_name), deflated)?;
        zip.write_all(render_chapter(book, chapter).as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

fn render_opf(book: &Book) -> String {
    let modified = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let mut manifest = String::from(
        r#"    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
"#,
    );
    // Reading order: navigation page first, then chapters in input order.
    let mut spine = String::from("    <itemref idref=\"nav\"/>\n");
    for chapter in &book.chapters {
        manifest.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"application/xhtml+xml\"/>\n",
            escape_xml(&chapter.id),
            escape_xml(&chapter.file_name)
        ));
        spine.push_str(&format!(
            "    <itemref idref=\"{}\"/>\n",
            escape_xml(&chapter.id)
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="book-id">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:identifier id="book-id">{identifier}</dc:identifier>
    <dc:title>{title}</dc:title>
    <dc:language>{language}</dc:language>
    <dc:creator>{author}</dc:creator>
    <meta property="dcterms:modified">{modified}</meta>
  </metadata>
  <manifest>
{manifest}  </manifest>
  <spine toc="ncx">
{spine}  </spine>
</package>
"#,
        identifier = escape_xml(&book.meta.identifier),
        title = escape_xml(&book.meta.title),
        language = escape_xml(&book.meta.language),
        author = escape_xml(&book.meta.author),
        modified = modified,
        manifest = manifest,
        spine = spine,
    )
}

fn render_nav(book: &Book) -> String {
    let mut entries = String::new();
    for chapter in &book.chapters {
        entries.push_str(&format!(
            "      <li><a href=\"{}\">{}</a></li>\n",
            escape_xml(&chapter.file_name),
            escape_xml(&chapter.title)
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops" lang="{language}">
<head>
  <title>{title}</title>
</head>
<body>
  <nav epub:type="toc">
    <h1>目录</h1>
    <ol>
{entries}    </ol>
  </nav>
</body>
</html>
"#,
        language = escape_xml(&book.meta.language),
        title = escape_xml(&book.meta.title),
        entries = entries,
    )
}

fn render_ncx(book: &Book) -> String {
    let mut nav_points = String::new();
    for (i, chapter) in book.chapters.iter().enumerate() {
        let order = i + 1;
        nav_points.push_str(&format!(
            r#"    <navPoint id="{id}" playOrder="{order}">
      <navLabel><text>{title}</text></navLabel>
      <content src="{src}"/>
    </navPoint>
"#,
            id = escape_xml(&chapter.id),
            order = order,
            title = escape_xml(&chapter.title),
            src = escape_xml(&chapter.file_name),
        ));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content="{identifier}"/>
    <meta name="dtb:depth" content="1"/>
  </head>
  <docTitle><text>{title}</text></docTitle>
  <navMap>
{nav_points}  </navMap>
</ncx>
"#,
        identifier = escape_xml(&book.meta.identifier),
        title = escape_xml(&book.meta.title),
        nav_points = nav_points,
    )
}

fn render_chapter(book: &Book, chapter: &BookChapter) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" lang="{language}">
<head>
  <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        language = escape_xml(&book.meta.language),
        title = escape_xml(&chapter.title),
        body = chapter.body_html,
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
