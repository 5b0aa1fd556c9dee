//! Pipeline tests with an in-process backend

use einvoice::{generate, GenerateError, GenerateOptions};
use pdf_core::{PageConfig, PdfBackend, PdfError};
use lopdf::dictionary;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Records every call and answers with a fixed result
struct FakeBackend {
    fail: bool,
    calls: RefCell<Vec<(String, PageConfig, Duration)>>,
}

impl FakeBackend {
    fn ok() -> Self {
        Self {
            fail: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl PdfBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    fn render(&self, html: &str, page: &PageConfig, timeout: Duration) -> pdf_core::Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((html.to_string(), *page, timeout));
        if self.fail {
            Err(PdfError::Timeout(timeout))
        } else {
            Ok(single_page_pdf())
        }
    }
}

fn single_page_pdf() -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.4");
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Pages",
            "Count" => 1,
            "Kids" => vec![lopdf::Object::from(page_id)],
        }),
    );
    let catalog_id = doc.add_object(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

fn invoice_json(item_count: usize) -> String {
    let items: Vec<_> = (0..item_count)
        .map(|i| json!({ "name": format!("品項 {i}"), "quantity": 1, "unitPrice": 1500 }))
        .collect();

    json!({
        "invoiceNumber": "AB-12345678",
        "invoiceDate": "2025-01-22",
        "formatCode": "25",
        "randomCode": "8472",
        "seller": { "name": "賣方股份有限公司", "taxId": "12345678", "address": "台北市" },
        "buyer": { "name": "買方有限公司", "taxId": "87654321", "address": "台南市" },
        "items": items,
        "taxType": "taxable",
        "salesAmount": 1429,
        "taxAmount": 71,
        "totalAmount": 1500
    })
    .to_string()
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_generates_pdf_and_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    fs::write(&input, invoice_json(1)).unwrap();

    let mut options = GenerateOptions::new(&input, dir.path().join("proof.pdf"));
    options.emit_html = true;
    let backend = FakeBackend::ok();

    let report = generate(&options, &backend).unwrap();

    assert_eq!(file_names(dir.path()), ["invoice.json", "proof.html", "proof.pdf"]);
    assert!(report.pdf_path.is_absolute());
    assert!(report.pdf_path.ends_with("proof.pdf"));
    assert_eq!(fs::read(&report.pdf_path).unwrap(), single_page_pdf());
    assert_eq!(report.pdf_info.map(|i| i.page_count), Some(1));

    let html_path = report.html_path.unwrap();
    let html = fs::read_to_string(&html_path).unwrap();
    assert!(html.contains("1,500"));
    assert!(html.contains("壹仟伍佰元整"));
    assert!(html.contains(r#"id="tax-taxable" checked"#));

    // The backend got the same HTML with A4 geometry and the default deadline
    let calls = backend.calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, html);
    assert_eq!(calls[0].1, PageConfig::a4());
    assert_eq!(calls[0].2, Duration::from_secs(30));
}

#[test]
fn test_html_not_written_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    fs::write(&input, invoice_json(2)).unwrap();

    let options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    let report = generate(&options, &FakeBackend::ok()).unwrap();

    assert!(report.html_path.is_none());
    assert_eq!(file_names(dir.path()), ["invoice.json", "invoice.pdf"]);
}

#[test]
fn test_malformed_json_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, r#"{ "invoiceNumber": "AB-1", "items": [ "#).unwrap();

    let mut options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    options.emit_html = true;
    let backend = FakeBackend::ok();

    let err = generate(&options, &backend).unwrap_err();
    assert!(matches!(err, GenerateError::ParseInput { .. }));
    assert!(err.to_string().contains("broken.json"));
    assert_eq!(backend.call_count(), 0);
    assert_eq!(file_names(dir.path()), ["broken.json"]);
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.json");

    let options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    let err = generate(&options, &FakeBackend::ok()).unwrap_err();

    assert!(matches!(err, GenerateError::ReadInput { .. }));
    assert!(err.to_string().contains("absent.json"));
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_backend_failure_leaves_no_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    fs::write(&input, invoice_json(1)).unwrap();

    let options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    let err = generate(&options, &FakeBackend::failing()).unwrap_err();

    assert!(matches!(err, GenerateError::Backend(PdfError::Timeout(_))));
    assert_eq!(file_names(dir.path()), ["invoice.json"]);
}

#[test]
fn test_too_many_items_is_render_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    fs::write(&input, invoice_json(17)).unwrap();

    let options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    let backend = FakeBackend::ok();
    let err = generate(&options, &backend).unwrap_err();

    assert!(matches!(err, GenerateError::Render(_)));
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn test_custom_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    let layout = dir.path().join("layout.html");
    fs::write(&input, invoice_json(1)).unwrap();
    fs::write(&layout, "<h1>{{ invoiceNumber }}</h1>").unwrap();

    let mut options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    options.template = Some(layout);
    let backend = FakeBackend::ok();
    generate(&options, &backend).unwrap();

    assert_eq!(backend.calls.borrow()[0].0, "<h1>AB-12345678</h1>");
}

#[test]
fn test_missing_template_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("invoice.json");
    fs::write(&input, invoice_json(1)).unwrap();

    let mut options = GenerateOptions::new(&input, dir.path().join("invoice.pdf"));
    options.template = Some(dir.path().join("nope.html"));
    let err = generate(&options, &FakeBackend::ok()).unwrap_err();

    assert!(matches!(err, GenerateError::LoadTemplate(_)));
}
