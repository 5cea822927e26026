use spinglobe::prelude::*;

/// Spin the globe without a map engine and watch the markers restyle
fn main() -> spinglobe::Result<()> {
    #[cfg(feature = "debug")]
    spinglobe::init_logging();

    println!("🌍 Spinglobe Headless Example");
    println!("=============================");

    let options = GlobeOptions::default();
    let width = 1280.0;
    let host = SimulatedCamera::from_options(&options.camera, zoom_for_width(width, &options));
    let mut globe: Globe<_, _, MemoryElement> = Globe::new(host, ManualScheduler::new(), options);

    let source = StaticSource::from_json(
        r#"[
            {"image": "/listings/banff.jpg", "country": "ca", "price": "$240", "type": "Cabin", "lng": -115.57, "lat": 51.18},
            {"image": "/listings/tulum.jpg", "country": "mx", "price": "$130", "type": "Villa", "lng": -87.46, "lat": 20.21},
            {"image": "/listings/lisbon.jpg", "country": "pt", "price": "€95", "type": "Flat", "lng": -9.14, "lat": 38.72},
            {"image": "/listings/kyoto.jpg", "country": "jp", "price": "¥18000", "type": "Ryokan", "lng": 135.77, "lat": 35.01}
        ]"#,
    )?;
    let features = futures::executor::block_on(load_features(&source)).unwrap_or_default();
    let placed = globe.place_markers(features, |_, _| Some(MemoryElement::new()));
    println!("✅ Placed {} markers", placed);

    globe.start(width);
    println!("   Zoom for {}px: {:.3}", width, globe.host().state().zoom);

    println!("\n🔄 Spinning for 30 seconds:");
    for second in 1..=30 {
        globe.advance(Duration::from_secs(1));
        if second % 10 == 0 {
            report(&globe, second);
        }
    }

    println!("\n✋ Grabbing the globe:");
    globe.host_mut().push_interaction(InteractionSource::PointerDown);
    globe.host_mut().pan_by(-20.0, 0.0);
    globe.host_mut().push_interaction(InteractionSource::DragEnd);
    globe.dispatch_queued();
    println!(
        "   Paused at lng {:.2}, resume due in {:?}",
        globe.host().center().lng,
        globe.scheduler().next_due_in()
    );

    globe.advance(globe.options().idle_resume());
    println!("   Spin state after idle delay: {:?}", globe.rotation().state());

    println!("\n🎉 Headless example completed");
    Ok(())
}

fn report(globe: &Globe<SimulatedCamera, ManualScheduler, MemoryElement>, second: u32) {
    let center = globe.host().center();
    println!("   t={:>2}s center ({:.2}, {:.2})", second, center.lat, center.lng);
    for marker in globe.styler().markers() {
        let element = marker.element();
        println!(
            "      {:<24} blur {:>5.2}px  scale {:.3}  opacity {}",
            marker.feature().image,
            element.blur_px.unwrap_or_default(),
            element.scale.unwrap_or_default(),
            element.opacity.unwrap_or_default(),
        );
    }
}
