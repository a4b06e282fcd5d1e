use gesture_calc::geometry::Point;
use gesture_calc::keypad::{build_layout, default_layout, hit_test, LayoutError, DEFAULT_KEYS};

#[test]
fn default_layout_has_exact_coordinates() {
    let buttons = default_layout();
    assert_eq!(buttons.len(), 16);

    let labels: Vec<&str> = buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        ["7", "8", "9", "+", "4", "5", "6", "-", "1", "2", "3", "*", "C", "0", "=", "/"]
    );

    assert_eq!(buttons[0].position, Point::new(50, 150));
    assert_eq!(buttons[3].position, Point::new(350, 150));
    assert_eq!(buttons[12].position, Point::new(50, 450));
    assert_eq!(buttons[15].position, Point::new(350, 450));
    for (i, button) in buttons.iter().enumerate() {
        let (row, col) = ((i / 4) as i32, (i % 4) as i32);
        assert_eq!(button.position, Point::new(col * 100 + 50, row * 100 + 150));
        assert_eq!((button.width, button.height), (80, 80));
    }
}

#[test]
fn default_buttons_do_not_overlap() {
    let buttons = default_layout();
    for (i, a) in buttons.iter().enumerate() {
        for b in buttons.iter().skip(i + 1) {
            assert!(
                !a.rect().overlaps(&b.rect()),
                "{} overlaps {}",
                a.label,
                b.label
            );
        }
    }
}

#[test]
fn containment_is_strict() {
    let buttons = default_layout();
    let seven = &buttons[0];
    assert!(seven.contains(51, 151));
    assert!(seven.contains(90, 190));
    assert!(!seven.contains(50, 190));
    assert!(!seven.contains(130, 190));
    assert!(!seven.contains(90, 150));
    assert!(!seven.contains(90, 230));
    assert!(!seven.contains(0, 0));
}

#[test]
fn hit_test_finds_the_button_under_the_point() {
    let buttons = default_layout();
    assert_eq!(
        hit_test(&buttons, Point::new(290, 490)).map(|b| b.label.as_str()),
        Some("=")
    );
    // Gap between columns.
    assert!(hit_test(&buttons, Point::new(140, 190)).is_none());
    assert!(hit_test(&buttons, Point::new(105, 102)).is_none());
}

#[test]
fn custom_layout_keeps_the_grid() {
    let rows = vec![
        vec!["(", ")", ".", "+"],
        vec!["4", "5", "6", "-"],
        vec!["1", "2", "3", "*"],
        vec!["C", "0", "=", "/"],
    ];
    let buttons = build_layout(&rows).unwrap();
    assert_eq!(buttons[0].label, "(");
    assert_eq!(buttons[2].position, Point::new(250, 150));
    assert_eq!(build_layout(&DEFAULT_KEYS).unwrap(), default_layout());
}

#[test]
fn malformed_layouts_are_rejected() {
    let three_rows = vec![vec!["1"; 4]; 3];
    assert_eq!(
        build_layout(&three_rows).unwrap_err(),
        LayoutError::RowCount { found: 3 }
    );

    let mut short_row = vec![vec!["1"; 4]; 4];
    short_row[2].pop();
    assert_eq!(
        build_layout(&short_row).unwrap_err(),
        LayoutError::ColumnCount { row: 2, found: 3 }
    );

    let mut long_label = vec![vec!["1"; 4]; 4];
    long_label[1][3] = "10";
    let err = build_layout(&long_label).unwrap_err();
    assert_eq!(
        err,
        LayoutError::InvalidLabel {
            row: 1,
            col: 3,
            label: "10".into()
        }
    );
    assert!(err.to_string().contains("\"10\""));
}
