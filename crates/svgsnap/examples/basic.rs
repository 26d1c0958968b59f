use svgsnap::{SnapOptions, SvgSnap};

fn main() {
    // A circle in a blank document.
    let snap = SvgSnap::default();
    let svg = snap.create_svg(Some(200.0), Some(200.0));
    svg.append("circle")
        .attr("cx", 100)
        .attr("cy", 100)
        .attr("r", 80)
        .attr("fill", "skyblue");
    println!("SVG with circle:\n{}\n", snap.svg_string());

    // Embedded CSS.
    let snap = SvgSnap::new(
        SnapOptions::new().with_styles("circle { stroke: red; stroke-width: 4; }"),
    );
    let svg = snap.create_svg(Some(150.0), Some(150.0));
    svg.append("circle")
        .attr("cx", 75)
        .attr("cy", 75)
        .attr("r", 50)
        .attr("fill", "yellow");
    println!("SVG with styled circle:\n{}\n", snap.svg_string());

    // Rendering into a container element, then reading the whole document back.
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
    println!("Serialized HTML:\n{}\n", snap.html());

    // Only the selected element.
    let snap = SvgSnap::new(
        SnapOptions::new()
            .with_container("<section><svg></svg></section>")
            .with_selector("svg"),
    );
    let svg = snap.create_svg(Some(50.0), Some(50.0));
    svg.append("ellipse")
        .attr("cx", 25)
        .attr("cy", 25)
        .attr("rx", 20)
        .attr("ry", 10)
        .attr("fill", "purple");
    println!("Chart HTML:\n{}", snap.chart_html());
}
