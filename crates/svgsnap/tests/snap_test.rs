use indexmap::IndexMap;
use svgsnap::{AttrValue, SnapOptions, SvgSnap};

fn parse_svg(svg: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse(svg).expect("svg_string is well-formed XML")
}

#[test]
fn blank_adapter_renders_sized_svg() {
    let snap = SvgSnap::default();
    let svg = snap.create_svg(Some(200.0), Some(200.0));
    svg.append("circle")
        .attr("cx", 100)
        .attr("cy", 100)
        .attr("r", 80)
        .attr("fill", "skyblue");

    assert_eq!(
        snap.svg_string(),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="200"><circle cx="100" cy="100" r="80" fill="skyblue"></circle></svg>"#
    );
    assert_eq!(
        snap.html(),
        format!("<html><head></head><body>{}</body></html>", snap.svg_string())
    );
    assert_eq!(snap.chart_html(), "");
}

#[test]
fn styles_are_wrapped_in_a_literal_cdata_marker() {
    for styles in ["circle { stroke: red; stroke-width: 4; }", "a > b { }", "x"] {
        let snap = SvgSnap::new(SnapOptions::new().with_styles(styles));
        let svg = snap.create_svg(Some(150.0), Some(150.0));

        let style = svg.select("defs > style").unwrap();
        assert_eq!(style.len(), 1);
        assert_eq!(style.attr_value("type").as_deref(), Some("text/css"));
        assert_eq!(
            style.text_content().unwrap(),
            format!("<![CDATA[ {styles} ]]>")
        );

        let out = snap.svg_string();
        let xml = parse_svg(&out);
        let text = xml
            .descendants()
            .find(|n| n.has_tag_name("style"))
            .and_then(|n| n.text())
            .unwrap();
        assert_eq!(text, format!("<![CDATA[ {styles} ]]>"));
    }
}

#[test]
fn no_defs_without_styles() {
    let snap = SvgSnap::default();
    let svg = snap.create_svg(None, None);
    assert!(svg.select("defs").unwrap().is_empty());
    assert_eq!(
        snap.svg_string(),
        r#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#
    );
}

#[test]
fn size_is_applied_only_when_both_dimensions_are_positive() {
    let cases: [(Option<f64>, Option<f64>, bool); 6] = [
        (Some(800.0), Some(600.0), true),
        (Some(0.0), Some(600.0), false),
        (Some(800.0), None, false),
        (None, Some(600.0), false),
        (Some(-1.0), Some(600.0), false),
        (None, None, false),
    ];
    for (width, height, sized) in cases {
        let snap = SvgSnap::default();
        let svg = snap.create_svg(width, height);
        if sized {
            assert_eq!(svg.attr_value("width").as_deref(), Some("800"));
            assert_eq!(svg.attr_value("height").as_deref(), Some("600"));
        } else {
            assert_eq!(svg.attr_value("width"), None, "{width:?}x{height:?}");
            assert_eq!(svg.attr_value("height"), None, "{width:?}x{height:?}");
        }
        assert_eq!(
            svg.attr_value("xmlns").as_deref(),
            Some("http://www.w3.org/2000/svg")
        );
    }
}

#[test]
fn later_duplicate_attrs_win() {
    let snap = SvgSnap::default();
    let svg = snap.create_svg_with_attrs(None, None, [("a", "1"), ("b", "2"), ("a", "3")]);
    assert_eq!(svg.attr_value("a").as_deref(), Some("3"));
    assert_eq!(svg.attr_value("b").as_deref(), Some("2"));
    assert_eq!(
        snap.svg_string(),
        r#"<svg xmlns="http://www.w3.org/2000/svg" a="3" b="2"></svg>"#
    );
}

#[test]
fn attrs_accept_numbers_and_override_size() {
    let mut attrs: IndexMap<&str, AttrValue> = IndexMap::new();
    attrs.insert("viewBox", AttrValue::from("0 0 10 10"));
    attrs.insert("width", AttrValue::Num(1.5));
    let snap = SvgSnap::default();
    let svg = snap.create_svg_with_attrs(Some(10.0), Some(20.0), attrs);
    assert_eq!(
        snap.svg_string(),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="1.5" height="20" viewBox="0 0 10 10"></svg>"#
    );
    assert_eq!(svg.attr_value("viewBox").as_deref(), Some("0 0 10 10"));
}

#[test]
fn selector_narrows_the_working_root() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<div id='chart'></div>")
            .with_selector("#chart"),
    );
    let svg = snap.create_svg(Some(100.0), Some(100.0));
    svg.append("rect")
        .attr("x", 10)
        .attr("y", 10)
        .attr("width", 80)
        .attr("height", 80)
        .attr("fill", "green");

    let expected_svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect x="10" y="10" width="80" height="80" fill="green"></rect></svg>"#;
    assert_eq!(snap.svg_string(), expected_svg);
    assert_eq!(
        snap.html(),
        format!(r#"<html><head></head><body><div id="chart">{expected_svg}</div></body></html>"#)
    );
    assert_eq!(
        snap.chart_html(),
        format!(r#"<div id="chart">{expected_svg}</div>"#)
    );
}

#[test]
fn selector_matching_an_existing_svg_appends_inside_it() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<section><svg></svg></section>")
            .with_selector("svg"),
    );
    let svg = snap.create_svg(Some(50.0), Some(50.0));
    svg.append("ellipse").attr("rx", 20).attr("ry", 10);

    assert_eq!(
        snap.chart_html(),
        r#"<svg><svg xmlns="http://www.w3.org/2000/svg" width="50" height="50"><ellipse rx="20" ry="10"></ellipse></svg></svg>"#
    );
    assert_eq!(
        snap.svg_string(),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="50"><ellipse rx="20" ry="10"></ellipse></svg>"#
    );
}

#[test]
fn selector_miss_is_silent() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<div id='chart'></div>")
            .with_selector("#missing"),
    );
    let svg = snap.create_svg(Some(10.0), Some(10.0));
    svg.append("circle").attr("r", 5);

    assert!(svg.is_empty());
    assert_eq!(snap.svg_string(), "");
    assert_eq!(snap.chart_html(), "");
    assert_eq!(
        snap.html(),
        r#"<html><head></head><body><div id="chart"></div></body></html>"#
    );
}

#[test]
fn invalid_selector_behaves_like_a_miss() {
    let snap = SvgSnap::new(SnapOptions::new().with_selector("#"));
    let svg = snap.create_svg(Some(10.0), Some(10.0));
    assert!(svg.is_empty());
    assert_eq!(snap.svg_string(), "");
    assert_eq!(snap.chart_html(), "");
}

#[test]
fn working_root_only_looks_below_body() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<html><head><title>t</title></head><body></body></html>")
            .with_selector("title"),
    );
    assert!(snap.create_svg(None, None).is_empty());
    assert_eq!(snap.chart_html(), "<title>t</title>");
}

#[test]
fn svg_string_fixes_tag_case_but_html_does_not() {
    let snap = SvgSnap::default();
    let svg = snap.create_svg(Some(10.0), Some(10.0));
    let defs = svg.append("defs");
    defs.append("linearGradient")
        .attr("id", "g")
        .append("stop")
        .attr("offset", "0");
    defs.append("clipPath").attr("id", "c");

    let out = snap.svg_string();
    assert!(out.contains(r#"<linearGradient id="g"><stop offset="0"></stop></linearGradient>"#));
    assert!(out.contains(r#"<clipPath id="c"></clipPath>"#));
    let xml = parse_svg(&out);
    assert!(xml.descendants().any(|n| n.has_tag_name("linearGradient")));

    let html = snap.html();
    assert!(html.contains("<lineargradient id=\"g\">"));
    assert!(html.contains("</clippath>"));
}

#[test]
fn svg_string_reads_the_first_svg_only() {
    let snap = SvgSnap::default();
    snap.create_svg(Some(1.0), Some(1.0)).attr("id", "first");
    snap.create_svg(Some(2.0), Some(2.0)).attr("id", "second");
    assert!(snap.svg_string().contains("id=\"first\""));
    assert!(!snap.svg_string().contains("second"));
}

#[test]
fn adapters_do_not_share_documents() {
    let a = SvgSnap::default();
    let b = SvgSnap::default();
    a.create_svg(None, None).append("g");
    assert_eq!(b.svg_string(), "");
    assert_eq!(b.html(), "<html><head></head><body></body></html>");
}

#[test]
fn options_load_from_json() {
    let options =
        SnapOptions::from_json(r##"{"selector": "#chart", "container": "<div id=chart></div>"}"##)
            .unwrap();
    assert_eq!(options.selector, "#chart");
    assert_eq!(options.styles, "");
    assert!(options.canvas_module.is_none());

    let snap = SvgSnap::new(options);
    snap.create_svg(None, None);
    assert!(snap.chart_html().starts_with("<div id=\"chart\"><svg"));

    assert!(matches!(
        SnapOptions::from_json("{\"selector\": 3}"),
        Err(svgsnap::Error::Json(_))
    ));
}

#[test]
fn table_container_gets_an_implied_tbody() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<table><tr><td id='chart'></td></tr></table>")
            .with_selector("#chart"),
    );
    snap.create_svg(Some(10.0), Some(10.0));

    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"></svg>"#;
    assert_eq!(snap.svg_string(), svg);
    assert_eq!(
        snap.html(),
        format!(
            r#"<html><head></head><body><table><tbody><tr><td id="chart">{svg}</td></tr></tbody></table></body></html>"#
        )
    );
}

#[test]
fn abruptly_closed_comment_keeps_the_chart_target() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<!--><div id='chart'></div>")
            .with_selector("#chart"),
    );
    snap.create_svg(Some(10.0), Some(10.0));

    assert!(snap.svg_string().starts_with("<svg "));
    assert!(snap.html().starts_with(r#"<!----><html><head></head><body><div id="chart"><svg "#));
}

#[test]
fn stray_paragraph_end_tag_inserts_an_empty_paragraph() {
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<div id=c></p></div>")
            .with_selector("#c"),
    );
    snap.create_svg(None, None);
    assert_eq!(
        snap.chart_html(),
        r#"<div id="c"><p></p><svg xmlns="http://www.w3.org/2000/svg"></svg></div>"#
    );
}
