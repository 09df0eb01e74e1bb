use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ErrorBannerProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<()>>,
}

/// Inline error message with an optional dismiss button
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let dismiss = props.on_dismiss.clone().map(|on_dismiss| {
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    });

    html! {
        <div role="alert" class="flex items-start justify-between gap-4 p-4 mb-4 rounded-md bg-red-50 border border-red-200 text-red-800 text-sm">
            <span>{&props.message}</span>
            if let Some(onclick) = dismiss {
                <button class="font-semibold" {onclick}>{"Dismiss"}</button>
            }
        </div>
    }
}
