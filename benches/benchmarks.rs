// benches/benchmarks.rs — Performance benchmarks (criterion)
//
//   1. Payload decoding — SOAP response envelope to key/value tree
//   2. Prompt rendering — formatter + analyst template over a large payload
//   3. Page rendering — transcript with many Markdown turns

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use retail_chat::core::format::format_for_response;
use retail_chat::core::prompt::{PromptInputs, PromptTemplate};
use retail_chat::core::session::{ChatTurn, Session};
use retail_chat::service::envelope::parse_response;
use retail_chat::service::FetchParameters;
use retail_chat::web::page::PageRenderer;

// ─── Helpers ────────────────────────────────────────────────────────────────

/// A sell-through response with `rows` report lines.
fn response_envelope(rows: usize) -> String {
    let mut body = String::new();
    for i in 0..rows {
        body.push_str(&format!(
            "<Row><StoreNo>{}</StoreNo><Class>Class {}</Class>\
             <SoldQty>{}</SoldQty><OnHand>{}</OnHand><SellThru>{:.2}</SellThru></Row>",
            i % 40,
            i % 25,
            i * 3,
            i * 7,
            (i % 100) as f64 / 100.0
        ));
    }
    format!(
        "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\"><s:Body>\
         <RA_REPORT_CLASS_SELLTHRUResponse xmlns=\"http://tempuri.org/\">\
         <RA_REPORT_CLASS_SELLTHRUResult>{body}</RA_REPORT_CLASS_SELLTHRUResult>\
         </RA_REPORT_CLASS_SELLTHRUResponse></s:Body></s:Envelope>"
    )
}

// ─── Benchmarks ─────────────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let xml = response_envelope(1_000);
    c.bench_function("decode_sellthru_1000_rows", |b| {
        b.iter(|| parse_response(black_box(&xml), "RA_REPORT_CLASS_SELLTHRU").unwrap())
    });
}

fn bench_prompt(c: &mut Criterion) {
    let payload = parse_response(&response_envelope(1_000), "RA_REPORT_CLASS_SELLTHRU").unwrap();
    let template = PromptTemplate::analyst().unwrap();
    c.bench_function("render_prompt_1000_rows", |b| {
        b.iter(|| {
            let inputs = PromptInputs {
                formatted_data: format_for_response(black_box(&payload)).render_text(),
                question: "Which class had the best sell-through?".into(),
            };
            template.render(&inputs).unwrap()
        })
    });
}

fn bench_page(c: &mut Criterion) {
    let renderer = PageRenderer::new("Chat with Retail Service").unwrap();
    let mut session = Session::new(FetchParameters::new("2", "141"));
    for i in 0..100 {
        session.push_turn(ChatTurn::human(format!("Question {i}: how did class {i} do?")));
        session.push_turn(ChatTurn::ai(format!(
            "Class {i} sold **{}** units.\n\n| Store | Qty |\n|---|---|\n| 1 | {} |",
            i * 3,
            i
        )));
    }
    c.bench_function("render_page_200_turns", |b| {
        b.iter(|| renderer.render(black_box(&session), None).unwrap())
    });
}

criterion_group!(benches, bench_decode, bench_prompt, bench_page);
criterion_main!(benches);
