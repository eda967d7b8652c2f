use gloo_utils::document;
use leaflet::{LatLng, Layer, Map, MapOptions, Marker, MouseEvent, MouseEvents, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys::{Object, Reflect},
    HtmlElement, Node,
};
use workout_tracker_lib::{
    coords::Coords,
    map::{MapView, MarkerSpec, PanAnimation},
};
use yew::prelude::*;

/// Creates the element the leaflet map is mounted into.
pub fn create_map_container() -> Option<HtmlElement> {
    let container = document().create_element("div").ok()?;
    let container: HtmlElement = container.dyn_into().ok()?;
    container.set_id("map");
    Some(container)
}

/// Leaflet map driven by the app controller.
pub struct LeafletMap {
    map: Map,
}

impl LeafletMap {
    pub fn new(container: &HtmlElement) -> Self {
        Self {
            map: Map::new_with_element(container, &MapOptions::default()),
        }
    }

    pub fn on_click(&self, callback: Callback<Coords>) {
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let lat_lng = event.lat_lng();
            callback.emit(Coords(lat_lng.lat(), lat_lng.lng()));
        }));
    }
}

impl MapView for LeafletMap {
    fn set_view(&mut self, center: Coords, zoom: f64, pan: Option<PanAnimation>) {
        let center = LatLng::new(center.lat(), center.lng());

        let Some(pan) = pan else {
            self.map.set_view(&center, zoom);
            return;
        };

        match pan_options(pan) {
            Ok(options) => {
                self.map.set_view_with_options(&center, zoom, &options);
            }
            Err(_) => {
                self.map.set_view(&center, zoom);
            }
        }
    }

    fn add_tile_layer(&mut self, url: &str, attribution: &str) {
        let opts = TileLayerOptions::new();
        opts.set_attribution(attribution.into());
        opts.set_update_when_idle(true);
        TileLayer::new_options(url, &opts).add_to(&self.map);
    }

    fn add_marker(&mut self, placement: &MarkerSpec) {
        let popup_opts = PopupOptions::default();
        popup_opts.set_max_width(placement.max_width);
        popup_opts.set_min_width(placement.min_width);
        popup_opts.set_auto_close(placement.auto_close);
        popup_opts.set_close_on_click(placement.close_on_click);
        popup_opts.set_class_name(placement.class_name.clone());

        let popup = Popup::new(&popup_opts, None);
        popup.set_content(&placement.content.as_str().into());

        let marker = Marker::new(&LatLng::new(placement.coords.lat(), placement.coords.lng()));
        marker.add_to(&self.map);
        marker.bind_popup(&popup);
        marker.open_popup();
    }
}

// { animate: true, pan: { duration } }
fn pan_options(pan: PanAnimation) -> Result<JsValue, JsValue> {
    let pan_opts = Object::new();
    Reflect::set(&pan_opts, &"duration".into(), &pan.duration_s.into())?;

    let opts = Object::new();
    Reflect::set(&opts, &"animate".into(), &true.into())?;
    Reflect::set(&opts, &"pan".into(), &pan_opts)?;

    Ok(opts.into())
}

pub struct MapComponent;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub container: HtmlElement,
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let node: &Node = ctx.props().container.as_ref();
        Html::VRef(node.clone())
    }
}
