use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::geometry::Point;
use crate::style::{
	EdgeStyle, NodeShape, NodeStyle, default_edge_style, default_node_style,
	resolve_edge_styles, resolve_node_labels, resolve_node_styles,
};

const BACKGROUND: &str = "#f8fafc";
const ARROW_SIZE: f64 = 10.0;
const DASH: f64 = 6.0;
const GAP: f64 = 4.0;
const NODE_STROKE_WIDTH: f64 = 2.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let (width, height) = (f64::from(state.size.width), f64::from(state.size.height));
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);

	let scene = &state.scene;
	let frame = state.frame();
	let selected = state.interaction.selected_node_id();
	let colors = state.options.selection_colors;
	let node_styles = resolve_node_styles(scene.model(), selected, |input| {
		default_node_style(input, &colors)
	});
	let edge_styles = resolve_edge_styles(scene.renderable_edges(), selected, |input| {
		default_edge_style(input, &colors)
	});
	let labels = resolve_node_labels(scene.model());

	let layers = &frame.priority;
	draw_edges(state, ctx, &layers.background_edges, &edge_styles);
	draw_nodes(state, ctx, &layers.background_nodes, &node_styles, &labels);
	draw_edges(state, ctx, &layers.foreground_edges, &edge_styles);
	draw_nodes(state, ctx, &layers.foreground_nodes, &node_styles, &labels);
}

fn draw_edges(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	indices: &[usize],
	styles: &[EdgeStyle],
) {
	let frame = state.frame();
	let edges = state.scene.renderable_edges();

	for &index in indices {
		let (Some(edge), Some(style)) = (edges.get(index), styles.get(index)) else {
			continue;
		};
		let (Some(&from), Some(&to)) = (frame.positions.get(edge.from_id), frame.positions.get(edge.to_id))
		else {
			continue;
		};
		let delta = to - from;
		let dist = f64::from(delta.length());
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (f64::from(delta.x) / dist, f64::from(delta.y) / dist);
		let from_radius = radius_of(state, edge.from_id);
		let to_radius = radius_of(state, edge.to_id);
		let head = if edge.draw_arrow { ARROW_SIZE } else { 0.0 };
		let (x1, y1, x2, y2) = (
			f64::from(from.x),
			f64::from(from.y),
			f64::from(to.x),
			f64::from(to.y),
		);

		let color = style.color.to_css();
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(f64::from(style.width));
		if style.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(DASH),
				&JsValue::from_f64(GAP),
			));
		}
		ctx.begin_path();
		ctx.move_to(x1 + ux * from_radius, y1 + uy * from_radius);
		ctx.line_to(x2 - ux * (to_radius + head), y2 - uy * (to_radius + head));
		ctx.stroke();
		if style.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		if edge.draw_arrow {
			ctx.set_fill_style_str(&color);
			let (tip_x, tip_y) = (x2 - ux * to_radius, y2 - uy * to_radius);
			let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
			let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_nodes(
	state: &CanvasState,
	ctx: &CanvasRenderingContext2d,
	indices: &[usize],
	styles: &[NodeStyle],
	labels: &[String],
) {
	let frame = state.frame();
	let label = &state.options.label;
	let font_size = f64::from(label.resolved_font_size());
	ctx.set_font(&format!("{font_size}px sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");

	for &id in indices {
		let (Some(&center), Some(style)) = (frame.positions.get(id), styles.get(id)) else {
			continue;
		};
		let radius = radius_of(state, id);

		trace_shape(ctx, &style.shape, center, radius);
		ctx.set_fill_style_str(&style.fill_color.to_css());
		ctx.fill();
		ctx.set_stroke_style_str(&style.stroke_color.to_css());
		ctx.set_line_width(NODE_STROKE_WIDTH);
		ctx.stroke();

		let Some(text) = labels.get(id).filter(|text| !text.is_empty()) else {
			continue;
		};
		ctx.set_fill_style_str(&style.label_color.to_css());
		let _ = ctx.fill_text_with_max_width(
			text,
			f64::from(center.x),
			f64::from(center.y) + radius + f64::from(label.resolved_vertical_padding()),
			f64::from(label.resolved_width()),
		);
	}
}

fn radius_of(state: &CanvasState, id: usize) -> f64 {
	state.frame().radii.get(id).copied().map_or(0.0, f64::from)
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: &NodeShape, center: Point, radius: f64) {
	let (x, y) = (f64::from(center.x), f64::from(center.y));
	ctx.begin_path();
	match shape {
		NodeShape::Circle => {
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		}
		NodeShape::RoundedRect => {
			let corner = radius * 0.35;
			let (left, top, right, bottom) = (x - radius, y - radius, x + radius, y + radius);
			ctx.move_to(left + corner, top);
			let _ = ctx.arc_to(right, top, right, bottom, corner);
			let _ = ctx.arc_to(right, bottom, left, bottom, corner);
			let _ = ctx.arc_to(left, bottom, left, top, corner);
			let _ = ctx.arc_to(left, top, right, top, corner);
			ctx.close_path();
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - radius);
			ctx.line_to(x + radius, y);
			ctx.line_to(x, y + radius);
			ctx.line_to(x - radius, y);
			ctx.close_path();
		}
		NodeShape::Hexagon => {
			for corner in 0..6_u32 {
				let angle = PI / 3.0 * f64::from(corner);
				let (cx, cy) = (x + radius * angle.cos(), y + radius * angle.sin());
				if corner == 0 {
					ctx.move_to(cx, cy);
				} else {
					ctx.line_to(cx, cy);
				}
			}
			ctx.close_path();
		}
		NodeShape::Custom(builder) => {
			let vertices = builder.build(center, radius as f32);
			for (i, vertex) in vertices.iter().enumerate() {
				let (vx, vy) = (f64::from(vertex.x), f64::from(vertex.y));
				if i == 0 {
					ctx.move_to(vx, vy);
				} else {
					ctx.line_to(vx, vy);
				}
			}
			ctx.close_path();
		}
	}
}
