use wavelang::{translate_string, TranslatorOptions};

const OSCILLATOR: &str = include_str!("../src/parser/oscillator.wl");

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn oscillator_translates() {
    init();
    let translation = translate_string(OSCILLATOR, &TranslatorOptions::default()).unwrap();
    let expected = "\
{
    rate[0] = state[1];
    p = state[0] + dt * rate[0];
}
{
    rate[1] = 0 - omega * omega * state[0] - damping * state[1];
    v = state[1] + dt * rate[1];
}
{
    state[0] = state[0] + dt * rate[0];
    state[1] = state[1] + dt * rate[1];
    t = t + dt;
}
";
    assert_eq!(translation.output, expected);
    let names: Vec<&str> = translation
        .catastrophe
        .systems()
        .iter()
        .map(|s| s.name())
        .collect();
    assert_eq!(names, ["Position", "Velocity"]);
}

#[test]
fn oscillator_indices_are_in_range() {
    let options = TranslatorOptions {
        check_indices: true,
        ..Default::default()
    };
    assert!(translate_string(OSCILLATOR, &options).is_ok());

    let broken = OSCILLATOR.replace("rate[1] <- 0", "rate[2] <- 0");
    let err = translate_string(&broken, &options).unwrap_err();
    assert!(err
        .to_string()
        .contains("index 2 is out of range for rate[2]"));
}

#[test]
fn custom_indent_and_functions() {
    let text = "
        CATASTROPHE M
        VARIABLES x;
        SYSTEM S (1)
        BEGIN x <- clamp(x, 0, 1); END
        BEGIN END
    ";
    let mut options = TranslatorOptions {
        indent: "\t".to_string(),
        ..Default::default()
    };
    assert!(translate_string(text, &options).is_err());
    options.functions.push("clamp".to_string());
    let translation = translate_string(text, &options).unwrap();
    assert_eq!(translation.output, "{\n\tx = clamp(x, 0, 1);\n}\n{\n}\n");
}

#[test]
fn system_limit() {
    let text = "
        CATASTROPHE M
        VARIABLES x;
        SYSTEM S (1) BEGIN END
        SYSTEM R (1) BEGIN END
        BEGIN END
    ";
    let options = TranslatorOptions {
        max_systems: 1,
        ..Default::default()
    };
    let err = translate_string(text, &options).unwrap_err();
    assert!(err.to_string().contains("too many systems per catastrophe (limit is 1)"));
}
