use dioxus::prelude::*;
use ui::HeroSection;

use crate::viewport::use_viewport_size;

#[component]
pub fn Home() -> Element {
    let viewport = use_viewport_size();
    let size = viewport();

    rsx! {
        HeroSection { width: size.width, height: size.height }
    }
}
