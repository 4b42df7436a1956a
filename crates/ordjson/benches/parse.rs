use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ordjson::{encode_string, parse};

fn sample_document() -> String {
    let mut doc = String::from("[");
    for i in 0..200 {
        if i > 0 {
            doc.push(',');
        }
        doc.push_str(&format!(
            r#"{{"id":{i},"name":"item-{i}","price":{i}.75,"tags":["a","b","é"],"active":{}}}"#,
            i % 2 == 0
        ));
    }
    doc.push(']');
    doc
}

fn benches(c: &mut Criterion) {
    let doc = sample_document();
    c.bench_function("parse_document", |b| {
        b.iter(|| parse(black_box(doc.as_bytes())))
    });

    let value = parse(doc.as_bytes());
    c.bench_function("render_canonical", |b| b.iter(|| black_box(&value).to_json()));

    let text = "mixed ascii + caf\u{e9} \u{20ac}\nwith a newline and a tab\t".repeat(64);
    c.bench_function("encode_string", |b| {
        b.iter(|| encode_string(black_box(text.as_bytes())))
    });
}

criterion_group!(parse_benches, benches);
criterion_main!(parse_benches);
