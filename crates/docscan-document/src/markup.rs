// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan markup: the HTML document handed to the host print service.
//
// One full-page `<div>` per photo, in capture order. Every block breaks the
// page after itself except the last, so N photos give exactly N pages.

use std::fmt::Write;

use docscan_core::types::CapturedImage;

/// Class on every page block except the last.
pub const PAGE_BREAK_CLASS: &str = "page-break";

/// Class on the final page block.
pub const LAST_PAGE_CLASS: &str = "last-page";

const IMAGE_SRC_PREFIX: &str = "data:image/jpeg;base64,";

const HEAD: &str = r#"<html>
  <head>
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <style>
      body { margin: 0; padding: 0; }
      .page-break { page-break-after: always; }
      .last-page { page-break-after: avoid; }
    </style>
  </head>
  <body>
"#;

const TAIL: &str = "  </body>\n</html>\n";

/// Generated markup plus the number of page blocks it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMarkup {
    html: String,
    pages: usize,
}

/// One page block read back out of the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupPage<'a> {
    pub class: &'a str,
    /// Base64 JPEG payload.
    pub image: &'a str,
}

impl ScanMarkup {
    /// Build the markup for `images` in order.
    pub fn build(images: &[CapturedImage]) -> Self {
        let mut html = String::with_capacity(
            HEAD.len() + TAIL.len() + images.iter().map(|i| i.encoded.len() + 160).sum::<usize>(),
        );
        html.push_str(HEAD);

        for (index, image) in images.iter().enumerate() {
            let class = if index + 1 == images.len() {
                LAST_PAGE_CLASS
            } else {
                PAGE_BREAK_CLASS
            };
            // Writing into a String cannot fail.
            let _ = write!(
                html,
                "    <div class=\"{class}\">\n      <img src=\"{IMAGE_SRC_PREFIX}{}\" style=\"width: 100%; height: auto;\" />\n    </div>\n",
                image.encoded
            );
        }

        html.push_str(TAIL);
        Self {
            html,
            pages: images.len(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

/// Read the page blocks back out of markup produced by [`ScanMarkup::build`].
pub fn parse_pages(html: &str) -> Vec<MarkupPage<'_>> {
    let mut pages = Vec::new();
    let mut rest = html;

    while let Some(start) = rest.find("<div class=\"") {
        rest = &rest[start + "<div class=\"".len()..];
        let Some(class_end) = rest.find('"') else { break };
        let class = &rest[..class_end];
        rest = &rest[class_end..];

        let Some(src) = rest.find(IMAGE_SRC_PREFIX) else { break };
        rest = &rest[src + IMAGE_SRC_PREFIX.len()..];
        let Some(src_end) = rest.find('"') else { break };
        pages.push(MarkupPage {
            class,
            image: &rest[..src_end],
        });
        rest = &rest[src_end..];
    }

    pages
}
