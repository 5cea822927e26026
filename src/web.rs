//! Browser bootstrap over mapbox-gl
//!
//! [`init_globe`] is exported to JavaScript as `initGlobe`. It builds the
//! `mapboxgl.Map`, wires the engine events into a [`Globe`] and loads the
//! listing data in the background. Everything runs on the page's single
//! thread; callbacks that arrive while the globe is busy are queued and
//! handled once the current callback returns.

use crate::{
    animation::interpolation::EasingFunction,
    core::{config::GlobeOptions, geo::LatLng, viewport::zoom_for_width},
    data::{
        assets::{AssetRoot, MarkerMarkup},
        feature::Feature,
        source::{load_features, HttpSource},
    },
    globe::Globe,
    input::events::{CameraEvent, SUBSCRIBED_ENGINE_EVENTS},
    layers::marker::{css, MarkerElement},
    runtime::{Scheduler, TimerId},
    traits::{CameraHost, EaseRequest},
    GlobeError, Result,
};
use fxhash::FxHashMap;
use js_sys::{Array, Object, Reflect};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{HtmlElement, Window};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    type MapboxMap;

    #[wasm_bindgen(catch, constructor, js_namespace = mapboxgl, js_class = "Map")]
    fn new(options: &JsValue) -> std::result::Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = getCenter)]
    fn get_center(this: &MapboxMap) -> LngLat;

    #[wasm_bindgen(method, js_name = easeTo)]
    fn ease_to(this: &MapboxMap, options: &JsValue);

    #[wasm_bindgen(method, js_name = setZoom)]
    fn set_zoom(this: &MapboxMap, zoom: f64);

    #[wasm_bindgen(method)]
    fn on(this: &MapboxMap, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &MapboxMap, control: &JsValue);

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = LngLat)]
    type LngLat;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "LngLat")]
    fn new(lng: f64, lat: f64) -> LngLat;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LngLat) -> f64;

    /// Meters, on the same sphere the engine projects onto
    #[wasm_bindgen(method, js_name = distanceTo)]
    fn distance_to(this: &LngLat, other: &LngLat) -> f64;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Marker)]
    type MapboxMarker;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "Marker")]
    fn new(options: &JsValue) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = setLngLat)]
    fn set_lng_lat(this: &MapboxMarker, position: &JsValue) -> MapboxMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &MapboxMarker, map: &MapboxMap) -> MapboxMarker;

    #[wasm_bindgen(js_namespace = mapboxgl, js_name = AttributionControl)]
    type AttributionControl;

    #[wasm_bindgen(constructor, js_namespace = mapboxgl, js_class = "AttributionControl")]
    fn new(options: &JsValue) -> AttributionControl;
}

type WebGlobe = Globe<MapboxHost, BrowserScheduler, DomMarkerElement>;

fn host_err(value: JsValue) -> GlobeError {
    GlobeError::Host(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

fn to_js(error: GlobeError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn set_field(target: &Object, key: &str, value: &JsValue) -> Result<()> {
    Reflect::set(target, &JsValue::from_str(key), value).map_err(host_err)?;
    Ok(())
}

/// `[lng, lat]`, the order the engine takes coordinates in
fn lng_lat_array(position: LatLng) -> JsValue {
    Array::of2(&position.lng.into(), &position.lat.into()).into()
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or_default()
}

fn json_to_js(value: &serde_json::Value) -> Result<JsValue> {
    js_sys::JSON::parse(&value.to_string()).map_err(host_err)
}

/// [`CameraHost`] over a live `mapboxgl.Map`
pub struct MapboxHost {
    map: MapboxMap,
    easings: FxHashMap<EasingFunction, Closure<dyn Fn(f64) -> f64>>,
}

impl MapboxHost {
    fn new(container: &HtmlElement, width: f64, options: &GlobeOptions) -> Result<Self> {
        let camera = &options.camera;
        let map_options = json_to_js(&serde_json::json!({
            "style": camera.style_url,
            "projection": camera.projection,
            "center": camera.center,
            "zoom": zoom_for_width(width, options),
            "pitch": camera.pitch,
            "minZoom": camera.min_zoom,
            "maxZoom": camera.max_zoom,
            "scrollZoom": camera.scroll_zoom,
            "boxZoom": camera.box_zoom,
            "doubleClickZoom": camera.double_click_zoom,
            "dragRotate": camera.drag_rotate,
            "touchPitch": camera.touch_pitch,
            "attributionControl": !camera.compact_attribution,
        }))?;
        set_field(map_options.unchecked_ref(), "container", container)?;

        let map = MapboxMap::new(&map_options).map_err(host_err)?;
        if camera.compact_attribution {
            let control = AttributionControl::new(&json_to_js(&serde_json::json!({
                "compact": true
            }))?);
            map.add_control(&control);
        }

        Ok(Self {
            map,
            easings: FxHashMap::default(),
        })
    }

    /// Add a marker for `feature` and return its style target
    pub fn add_marker(&self, feature: &Feature, assets: &AssetRoot) -> Result<DomMarkerElement> {
        let markup = MarkerMarkup::for_feature(feature, assets);
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| GlobeError::Host("no document".to_string()))?;

        let root = document.create_element(markup.tag).map_err(host_err)?;
        root.set_class_name(markup.class_name);
        if let Some(href) = &markup.href {
            root.set_attribute("href", href).map_err(host_err)?;
        }
        if let Some(target) = markup.target() {
            root.set_attribute("target", target).map_err(host_err)?;
        }
        root.set_inner_html(&markup.inner_html);

        let options = Object::new();
        set_field(&options, "element", &root)?;
        set_field(&options, "anchor", &JsValue::from_str(MarkerMarkup::ANCHOR))?;
        MapboxMarker::new(&options)
            .set_lng_lat(&lng_lat_array(feature.position()))
            .add_to(&self.map);

        let root = root
            .dyn_into::<HtmlElement>()
            .map_err(|_| GlobeError::Host("marker root is not an HTML element".to_string()))?;
        Ok(DomMarkerElement { root })
    }

    fn ease_options(&mut self, request: EaseRequest) -> Result<Object> {
        let options = Object::new();
        set_field(&options, "center", &lng_lat_array(request.center))?;
        set_field(
            &options,
            "duration",
            &JsValue::from_f64(request.duration.as_millis() as f64),
        )?;
        let easing = self
            .easings
            .entry(request.easing)
            .or_insert_with(|| Closure::new(move |t: f64| request.easing.apply(t)));
        set_field(&options, "easing", easing.as_ref())?;
        Ok(options)
    }
}

impl CameraHost for MapboxHost {
    fn center(&self) -> LatLng {
        let center = self.map.get_center();
        LatLng::from_lng_lat(center.lng(), center.lat())
    }

    fn ease_to(&mut self, request: EaseRequest) {
        match self.ease_options(request) {
            Ok(options) => self.map.ease_to(&options),
            Err(e) => log::warn!("easeTo skipped: {}", e),
        }
    }

    fn set_zoom(&mut self, zoom: f64) {
        self.map.set_zoom(zoom);
    }

    fn distance_km(&self, from: LatLng, to: LatLng) -> f64 {
        let from = LngLat::new(from.lng, from.lat);
        let to = LngLat::new(to.lng, to.lat);
        from.distance_to(&to) / 1000.0
    }
}

/// Marker DOM node: `.wrap` takes blur and opacity, `.card` takes the scale
pub struct DomMarkerElement {
    root: HtmlElement,
}

impl DomMarkerElement {
    fn style_target(&self, selector: &'static str) -> Result<HtmlElement> {
        self.root
            .query_selector(selector)
            .map_err(host_err)?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or(GlobeError::MissingStyleTarget(selector))
    }

    fn set_style(element: &HtmlElement, (property, value): (&str, String)) -> Result<()> {
        element
            .style()
            .set_property(property, &value)
            .map_err(host_err)
    }
}

impl MarkerElement for DomMarkerElement {
    fn set_blur(&mut self, radius_px: f64) -> Result<()> {
        let wrap = self.style_target(".wrap")?;
        Self::set_style(&wrap, css::blur(radius_px))
    }

    fn set_opacity(&mut self, opacity: f64) -> Result<()> {
        let wrap = self.style_target(".wrap")?;
        Self::set_style(&wrap, css::opacity(opacity))
    }

    fn set_scale(&mut self, scale: f64) -> Result<()> {
        let card = self.style_target(".card")?;
        Self::set_style(&card, css::scale(scale))
    }

    fn set_z_index(&mut self, z_index: i32) -> Result<()> {
        Self::set_style(&self.root, css::z_index(z_index))
    }
}

struct PendingTimer {
    handle: i32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

/// [`Scheduler`] over `window.setTimeout`
///
/// Fired ids go to the `on_fire` callback given at construction.
pub struct BrowserScheduler {
    window: Window,
    on_fire: Rc<dyn Fn(TimerId)>,
    next_id: u64,
    pending: FxHashMap<TimerId, PendingTimer>,
}

impl BrowserScheduler {
    pub fn new(window: Window, on_fire: impl Fn(TimerId) + 'static) -> Self {
        Self {
            window,
            on_fire: Rc::new(on_fire),
            next_id: 0,
            pending: FxHashMap::default(),
        }
    }

    /// Release callbacks of timers that already ran
    fn prune(&mut self) {
        self.pending.retain(|_, timer| !timer.fired.get());
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.prune();
        self.next_id += 1;
        let id = TimerId(self.next_id);

        let fired = Rc::new(Cell::new(false));
        let callback = {
            let fired = fired.clone();
            let on_fire = self.on_fire.clone();
            Closure::<dyn FnMut()>::new(move || {
                (*on_fire)(id);
                // Marked after dispatch so the running callback is never pruned.
                fired.set(true);
            })
        };

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => {
                self.pending.insert(
                    id,
                    PendingTimer {
                        handle,
                        fired,
                        _callback: callback,
                    },
                );
            }
            Err(e) => log::warn!("setTimeout failed: {}", host_err(e)),
        }
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if let Some(timer) = self.pending.remove(&id) {
            if !timer.fired.get() {
                self.window.clear_timeout_with_handle(timer.handle);
            }
        }
    }
}

enum Delivery {
    Event(CameraEvent),
    Timer(TimerId),
}

/// The page's globe plus the deliveries waiting for it
struct GlobeCell {
    globe: RefCell<Option<WebGlobe>>,
    queue: RefCell<VecDeque<Delivery>>,
}

impl GlobeCell {
    fn deliver(&self, delivery: Delivery) {
        self.queue.borrow_mut().push_back(delivery);
        self.with_globe(|_| ());
    }

    /// Run `f` on the globe, then drain queued deliveries
    ///
    /// Re-entrant calls find the globe borrowed; their deliveries stay queued
    /// for the outer call to drain.
    fn with_globe(&self, f: impl FnOnce(&mut WebGlobe)) {
        let Ok(mut slot) = self.globe.try_borrow_mut() else {
            return;
        };
        let Some(globe) = slot.as_mut() else {
            // Nothing is mounted to receive them yet.
            self.queue.borrow_mut().clear();
            return;
        };

        f(globe);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            match next {
                Some(Delivery::Event(event)) => globe.handle_event(&event),
                Some(Delivery::Timer(id)) => globe.on_timer(id),
                None => break,
            }
        }
    }
}

fn subscribe(cell: &Rc<GlobeCell>, host: &MapboxHost) {
    for name in SUBSCRIBED_ENGINE_EVENTS {
        let Some(event) = CameraEvent::from_engine_event(name) else {
            continue;
        };
        let cell = cell.clone();
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            cell.deliver(Delivery::Event(event.clone()));
        });
        host.map.on(name, handler.as_ref().unchecked_ref());
        handler.forget();
    }
}

fn watch_resize(cell: &Rc<GlobeCell>, window: &Window) -> Result<()> {
    let cell = cell.clone();
    let viewport = window.clone();
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        let width = viewport_width(&viewport);
        cell.deliver(Delivery::Event(CameraEvent::Resize { width }));
    });
    window
        .add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())
        .map_err(host_err)?;
    handler.forget();
    Ok(())
}

fn set_access_token(token: &str) -> Result<()> {
    let mapboxgl = Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))
        .map_err(host_err)?;
    if mapboxgl.is_undefined() {
        return Err(GlobeError::Host("mapboxgl is not loaded".to_string()));
    }
    set_field(
        mapboxgl.unchecked_ref(),
        "accessToken",
        &JsValue::from_str(token),
    )
}

/// Mount the globe in `container`
///
/// `options_json` is a camelCase [`GlobeOptions`] document; missing fields
/// keep their defaults. Without a container nothing happens.
#[wasm_bindgen(js_name = initGlobe)]
pub fn init_globe(
    container: Option<HtmlElement>,
    options_json: Option<String>,
) -> std::result::Result<(), JsValue> {
    let _ = console_log::init_with_level(log::Level::Info);
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let Some(container) = container else {
        log::debug!("no globe container, skipping initialization");
        return Ok(());
    };
    let options = match options_json.as_deref() {
        Some(json) => GlobeOptions::from_json_str(json).map_err(to_js)?,
        None => GlobeOptions::default(),
    };
    if let Some(token) = options.assets.access_token.as_deref() {
        set_access_token(token).map_err(to_js)?;
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let cell = Rc::new(GlobeCell {
        globe: RefCell::new(None),
        queue: RefCell::new(VecDeque::new()),
    });

    let mounted = {
        let cell_ref: Weak<GlobeCell> = Rc::downgrade(&cell);
        let window = window.clone();
        let cell = &cell;
        Globe::mount(Some(container), options, move |container, options| {
            let host = MapboxHost::new(&container, viewport_width(&window), options)?;
            subscribe(cell, &host);
            watch_resize(cell, &window)?;
            let scheduler = BrowserScheduler::new(window, move |id| {
                if let Some(cell) = cell_ref.upgrade() {
                    cell.deliver(Delivery::Timer(id));
                }
            });
            Ok((host, scheduler))
        })
        .map_err(to_js)?
    };
    let Some(mut globe) = mounted else {
        return Ok(());
    };

    let assets = globe.options().assets.clone();
    let page = window.location().href().map_err(host_err);
    globe.start(viewport_width(&window));
    *cell.globe.borrow_mut() = Some(globe);

    wasm_bindgen_futures::spawn_local(async move {
        let source = match page.and_then(|page| HttpSource::from_assets_at(&assets, &page)) {
            Ok(source) => source,
            Err(e) => {
                log::error!("failed to load features: {}", e);
                return;
            }
        };
        let Some(features) = load_features(&source).await else {
            return;
        };
        let root = assets.asset_root();
        cell.with_globe(|globe| {
            globe.place_markers(features, |host, feature| {
                match host.add_marker(feature, &root) {
                    Ok(element) => Some(element),
                    Err(e) => {
                        log::warn!("marker for {} not added: {}", feature.image, e);
                        None
                    }
                }
            });
        });
    });

    Ok(())
}
