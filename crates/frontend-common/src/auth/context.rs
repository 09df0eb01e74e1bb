//! Page-load session context and provider

use crate::bootstrap::{BrowserTokenStore, PortalSnapshot, initialize_portal};
use crate::components::{ErrorBanner, Spinner};
use admissions_core::{ClientEnv, SessionTokens};
use admissions_http::PortalClient;
use std::rc::Rc;
use yew::prelude::*;

/// Immutable snapshot shared with the component tree.
///
/// Built once per page load. Login, logout and an expired session all leave
/// the page, so the snapshot never changes while mounted.
#[derive(Clone)]
pub struct PortalContext(Rc<PortalSnapshot>);

impl PortalContext {
    pub fn new(snapshot: PortalSnapshot) -> Self {
        Self(Rc::new(snapshot))
    }

    pub fn env(&self) -> &ClientEnv {
        &self.0.env
    }

    pub fn session(&self) -> Option<&SessionTokens> {
        self.0.tokens()
    }

    pub fn client(&self) -> &PortalClient {
        &self.0.client
    }

    pub fn store(&self) -> &BrowserTokenStore {
        &self.0.store
    }

    pub fn is_authenticated(&self) -> bool {
        self.0.client.is_authenticated()
    }
}

impl PartialEq for PortalContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Properties, PartialEq)]
pub struct PortalProviderProps {
    pub children: Children,
}

#[derive(Clone, PartialEq)]
enum LoadState {
    Loading,
    Ready(PortalContext),
    Failed(String),
}

/// Runs the bootstrap once and provides the resulting [`PortalContext`]
#[function_component(PortalProvider)]
pub fn portal_provider(props: &PortalProviderProps) -> Html {
    let state = use_state(|| LoadState::Loading);

    {
        let state = state.clone();
        use_effect_with((), move |()| {
            wasm_bindgen_futures::spawn_local(async move {
                match initialize_portal().await {
                    Ok(snapshot) => state.set(LoadState::Ready(PortalContext::new(snapshot))),
                    Err(e) => {
                        tracing::error!(error = %e, "Portal initialization failed");
                        state.set(LoadState::Failed(e.to_string()));
                    }
                }
            });
        });
    }

    match &*state {
        LoadState::Loading => html! { <Spinner text={"Loading your session..."} /> },
        LoadState::Failed(message) => html! { <ErrorBanner message={message.clone()} /> },
        LoadState::Ready(context) => html! {
            <ContextProvider<PortalContext> context={context.clone()}>
                { props.children.clone() }
            </ContextProvider<PortalContext>>
        },
    }
}

/// Portal snapshot, `None` outside a [`PortalProvider`]
#[hook]
pub fn use_portal() -> Option<PortalContext> {
    use_context::<PortalContext>()
}

/// Tokens of the restored session
#[hook]
pub fn use_session() -> Option<SessionTokens> {
    use_portal().and_then(|portal| portal.session().cloned())
}

#[hook]
pub fn use_is_authenticated() -> bool {
    use_portal().is_some_and(|portal| portal.is_authenticated())
}

/// Client in the auth state of the page load
#[hook]
pub fn use_client() -> Option<PortalClient> {
    use_portal().map(|portal| portal.client().clone())
}

/// Client env, or the fallback table outside a provider
#[hook]
pub fn use_env() -> ClientEnv {
    use_portal().map_or_else(ClientEnv::fallback, |portal| portal.env().clone())
}
