use crate::components::navbar::Navbar;
use yew::{Children, Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
}

/// Chrome shared by the signed-in views.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="min-h-screen bg-base-100 flex flex-col">
            <Navbar />
            <main class="flex-grow p-4 container mx-auto">
                {props.children.clone()}
            </main>
            <footer class="footer footer-center p-4 border-t border-base-300 text-base-content">
                <p>{"DashSync · Powered by Rust and Yew"}</p>
            </footer>
        </div>
    }
}
