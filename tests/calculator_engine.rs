use gesture_calc::calc::{CalcHistoryEntry, Calculator, CLEAR, DISPLAY_ENTRIES, EQUALS, ERROR_TOKEN};

fn press_all(calc: &mut Calculator, keys: &str) {
    for ch in keys.chars() {
        calc.on_symbol(&ch.to_string());
    }
}

#[test]
fn clear_on_empty_is_a_no_op() {
    let mut calc = Calculator::new();
    assert!(calc.on_symbol(CLEAR).is_none());
    assert!(calc.on_symbol(CLEAR).is_none());
    assert_eq!(calc.expression(), "");
    assert!(calc.history().is_empty());
}

#[test]
fn clear_discards_the_expression_but_not_history() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "1+1=");
    press_all(&mut calc, "+4");
    assert_eq!(calc.expression(), "2+4");
    calc.on_symbol(CLEAR);
    assert_eq!(calc.expression(), "");
    assert_eq!(calc.history().len(), 1);
}

#[test]
fn equals_records_and_replaces_the_expression() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "2+3");
    let entry = calc.on_symbol(EQUALS).cloned();
    assert_eq!(
        entry,
        Some(CalcHistoryEntry {
            expr: "2+3".into(),
            result: "5".into()
        })
    );
    assert_eq!(calc.expression(), "5");
}

#[test]
fn results_chain_into_the_next_expression() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "9/2=");
    assert_eq!(calc.expression(), "4.5");
    press_all(&mut calc, "*2=");
    assert_eq!(calc.expression(), "9");
    assert_eq!(calc.history().entries()[1].expr, "4.5*2");
}

#[test]
fn malformed_expression_yields_error_token() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "2+");
    let entry = calc.on_symbol(EQUALS).cloned().unwrap();
    assert_eq!(entry.expr, "2+");
    assert!(entry.is_error());
    assert_eq!(calc.expression(), ERROR_TOKEN);
}

#[test]
fn power_and_floor_division_spellings_yield_error_token() {
    for keys in ["2**3=", "7//2="] {
        let mut calc = Calculator::new();
        press_all(&mut calc, keys);
        assert_eq!(calc.expression(), ERROR_TOKEN, "{keys}");
        assert!(calc.history().entries()[0].is_error());
    }
}

#[test]
fn division_by_zero_yields_error_token() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "7/0=");
    assert_eq!(calc.expression(), ERROR_TOKEN);
    assert_eq!(calc.history().entries()[0].result, ERROR_TOKEN);
}

#[test]
fn next_symbol_replaces_error_token() {
    let mut calc = Calculator::new();
    press_all(&mut calc, "(=");
    assert_eq!(calc.expression(), ERROR_TOKEN);
    calc.on_symbol("4");
    assert_eq!(calc.expression(), "4");

    press_all(&mut calc, "/0=");
    assert_eq!(calc.expression(), ERROR_TOKEN);
    let entry = calc.on_symbol(EQUALS).cloned().unwrap();
    assert_eq!(entry.expr, "");
    assert!(entry.is_error());
}

#[test]
fn recent_history_is_newest_first_and_capped() {
    let mut calc = Calculator::new();
    for i in 0..12 {
        calc.on_symbol(CLEAR);
        press_all(&mut calc, &format!("{i}+1="));
    }
    assert_eq!(calc.history().len(), 12);

    let recent = calc.recent_history(DISPLAY_ENTRIES);
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].expr, "11+1");
    assert_eq!(recent[0].result, "12");
    assert_eq!(recent[9].expr, "2+1");
}
