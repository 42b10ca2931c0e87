/// Reusable UI components

use crate::tags::Tag;
use patternfly_yew::prelude::Spinner;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TagListProps {
    pub id: AttrValue,
    pub tags: Vec<Tag>,
    #[prop_or_default]
    pub class: Classes,
}

/// Tags rendered as labels, separated by spaces
#[function_component(TagList)]
pub fn tag_list(props: &TagListProps) -> Html {
    html! {
        <div id={props.id.clone()} class={classes!("tag-list", props.class.clone())}>
            {for props.tags.iter().enumerate().map(|(i, tag)| html! {
                <>
                    if i > 0 { {" "} }
                    <span class="pf-v5-c-label tag-label">
                        <span class="pf-v5-c-label__content">{tag.to_string()}</span>
                    </span>
                </>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub message: Option<String>,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="loading-text-center">
            <Spinner />
            if let Some(msg) = &props.message {
                <p class="loading-text">{msg}</p>
            }
        </div>
    }
}
