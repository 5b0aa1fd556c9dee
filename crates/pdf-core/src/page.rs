//! Page geometry

/// Page size and margins, in inches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Print background colors and images
    pub print_background: bool,
}

impl PageConfig {
    /// ISO A4 width in inches
    pub const A4_WIDTH: f64 = 8.27;
    /// ISO A4 height in inches
    pub const A4_HEIGHT: f64 = 11.69;

    /// A4 portrait, zero margins, backgrounds on
    pub fn a4() -> Self {
        Self {
            width: Self::A4_WIDTH,
            height: Self::A4_HEIGHT,
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            print_background: true,
        }
    }

    /// Set all four margins
    pub fn with_margins(mut self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        self.margin_top = top;
        self.margin_right = right;
        self.margin_bottom = bottom;
        self.margin_left = left;
        self
    }

    /// Enable or disable background printing
    pub fn with_background(mut self, print_background: bool) -> Self {
        self.print_background = print_background;
        self
    }

    /// Print stylesheet carrying this geometry
    pub fn css(&self) -> String {
        let mut css = format!(
            "@page {{ size: {}in {}in; margin: {}in {}in {}in {}in; }}",
            self.width,
            self.height,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left
        );
        if self.print_background {
            css.push_str(
                "\nhtml { -webkit-print-color-adjust: exact; print-color-adjust: exact; }",
            );
        }
        css
    }

    /// Insert the print stylesheet into an HTML document
    ///
    /// The style element goes just before `</head>` so it overrides any
    /// `@page` rule the document declares. Documents without a head get it
    /// prepended.
    pub fn apply_to(&self, html: &str) -> String {
        let style = format!("<style id=\"page-geometry\">\n{}\n</style>\n", self.css());
        // ASCII lowercasing keeps byte offsets valid for the original string
        match html.to_ascii_lowercase().find("</head>") {
            Some(pos) => {
                let mut out = String::with_capacity(html.len() + style.len());
                out.push_str(&html[..pos]);
                out.push_str(&style);
                out.push_str(&html[pos..]);
                out
            }
            None => format!("{style}{html}"),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}
