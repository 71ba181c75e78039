//! Long/short position: stop-loss and take-profit boxes sharing the entry edge.

use super::{BuildContext, Geometry, label_on_box};
use crate::domain::geometry::{Point, Rect};
use crate::domain::line_tool::{
    BoxAlignment, BoxHorizontalAlignment, BoxVerticalAlignment, CursorType, ShapeOptions, TextOptions,
};
use crate::infrastructure::rendering::renderers::{LineData, RectangleData, RendererData, TextData};

fn position_box(ctx: &BuildContext, a: Point, b: Point, shape: &ShapeOptions) -> RectangleData {
    RectangleData {
        points: [a, b],
        border: (shape.border.width > 0.0).then(|| LineData::from_border(&shape.border)),
        fill: shape.background.as_ref().map(|fill| fill.color.clone()),
        extend: shape.extend,
        hit_background: true,
        pane_width: ctx.width,
        tolerance: ctx.style.hit_tolerance,
    }
}

fn percent_change(ctx: &BuildContext, from: f64, to: f64) -> String {
    let from = ctx.mapper.format_price(from, ctx.base);
    let to = ctx.mapper.format_price(to, ctx.base);
    let change = if from == 0.0 { 0.0 } else { (to - from) / from * 100.0 };
    format!("({}{:.2}%)", if change >= 0.0 { "+" } else { "" }, change)
}

/// Auto text replaces the configured value, font and alignment
fn auto_text(ctx: &BuildContext, configured: &TextOptions, take_profit: bool) -> TextOptions {
    let points = ctx.points;
    let mut text = configured.clone();
    text.value = if take_profit {
        format!("TP: {}\n{}", ctx.price_label(points[2].price), percent_change(ctx, points[0].price, points[2].price))
    } else {
        format!(
            "Entry: {}\nStop: {}\n{}",
            ctx.price_label(points[0].price),
            ctx.price_label(points[1].price),
            percent_change(ctx, points[0].price, points[1].price)
        )
    };
    text.font = ctx.style.auto_text_font.clone();
    let hangs_below = take_profit == ctx.tool.long_short().is_long;
    let vertical = if hangs_below { BoxVerticalAlignment::Top } else { BoxVerticalAlignment::Bottom };
    text.text_box.alignment = BoxAlignment::new(vertical, BoxHorizontalAlignment::Center);
    text
}

pub fn build(ctx: &BuildContext) -> Option<Geometry> {
    let mut geometry = Geometry::default();
    let (entry, stop, target) = match ctx.screen {
        [a, b, c, ..] if ctx.points.len() >= 3 => (*a, *b, *c),
        _ => {
            geometry.anchors_from(ctx.screen);
            return Some(geometry);
        }
    };
    let options = &ctx.options().long_short;
    let stop_box = position_box(ctx, entry, stop, &options.entry_stop_loss_rectangle);
    let target_box = position_box(ctx, entry, target, &options.entry_tp_rectangle);
    let boxes = [
        (Rect::from_corners(entry, stop), &options.entry_stop_loss_text, false),
        (Rect::from_corners(entry, target), &options.entry_tp_text, true),
    ];
    geometry.push(RendererData::Rectangle(stop_box));
    geometry.push(RendererData::Rectangle(target_box));

    for (bounds, configured, take_profit) in boxes {
        let text = if options.show_auto_text { auto_text(ctx, configured, take_profit) } else { configured.clone() };
        if text.value.is_empty() {
            continue;
        }
        let (text, pivot) = label_on_box(&text, bounds, true);
        geometry.push(RendererData::Text(TextData::new(text, pivot)));
    }

    geometry.anchors_from(&[entry, stop, target]);
    geometry.cursors =
        vec![CursorType::DiagonalNwSeResize, CursorType::DiagonalNeSwResize, CursorType::VerticalResize];
    Some(geometry)
}
