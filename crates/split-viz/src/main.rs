use macroquad::prelude::*;
use split_viz::{
    comb_polygon, draw_cut, draw_partition, horizontal_cut, PieceNavigator, View,
};

/// Cut height change per frame while Up/Down is held.
const CUT_STEP: f64 = 0.02;

#[macroquad::main("Plane Split")]
async fn main() {
    env_logger::init();

    let mut cut_height: f64 = 3.0;
    let mut view = View::new(vec2(6.5, 3.5), 60.0).with_zoom(1.1, 10.0, 300.0);
    let mut navigator = PieceNavigator::new();

    loop {
        view.update();
        if is_key_down(KeyCode::Up) {
            cut_height += CUT_STEP;
        }
        if is_key_down(KeyCode::Down) {
            cut_height -= CUT_STEP;
        }
        cut_height = cut_height.clamp(-1.0, 8.0);

        let partition = comb_polygon().partition(&horizontal_cut(cut_height));
        if navigator.update(&partition) {
            log::debug!("selected piece {:?}", navigator.selected());
        }

        clear_background(Color::from_rgba(20, 20, 30, 255));

        draw_cut(&view, cut_height);
        draw_partition(&view, &partition, navigator.selected());

        draw_text(
            &format!("Plane split - cut at y = {cut_height:.2}"),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            &format!(
                "above: {} | on: {} | below: {}",
                partition.above.len(),
                partition.on.len(),
                partition.below.len()
            ),
            10.0,
            45.0,
            18.0,
            GRAY,
        );

        navigator.draw_ui(&partition, 70.0);

        draw_text("Up/Down to move the cut, scroll to zoom", 10.0, 115.0, 16.0, DARKGRAY);
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 135.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
