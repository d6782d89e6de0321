use divan::Bencher;
use wavelang::{parse_string, translate, TranslatorOptions};

fn main() {
    divan::main();
}

fn program(n: usize) -> String {
    format!(
        "
        CATASTROPHE Bench
        PARAMETERS k;
        VECTORS u[{n}];
        SYSTEM Step ({n})
        VARIABLES dt;
        BEGIN
        {}
        END
        BEGIN
        END
        ",
        (0..n)
            .map(|i| format!("u[{i}] <- u[{i}] + dt * (k * u[{i}] - sin(u[{i}]));"))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

#[divan::bench(consts = [1, 10, 100, 1000])]
fn parse<const N: usize>(bencher: Bencher) {
    let text = program(N);
    bencher.bench_local(|| parse_string(&text).unwrap());
}

#[divan::bench(consts = [1, 10, 100, 1000])]
fn translate_parsed<const N: usize>(bencher: Bencher) {
    let root = parse_string(&program(N)).unwrap();
    let options = TranslatorOptions::default();
    bencher.bench_local(|| translate(&root, &options).unwrap());
}
