/*
 * Placeholder rendering for components that produce no visual output of their
 * own. A childless style component renders as an empty placeholder tagged with
 * its declared name so host tooling can recognise it; otherwise rendering is
 * handed back to the host's normal child rendering.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub tag: String,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RenderOutput<'a, C> {
    Placeholder(Placeholder),
    Children(&'a [C]),
}

pub fn render_or_placeholder<'a, C>(name: &str, children: &'a [C]) -> RenderOutput<'a, C> {
    if children.is_empty() {
        RenderOutput::Placeholder(Placeholder {
            tag: name.to_string(),
        })
    } else {
        RenderOutput::Children(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_children_renders_placeholder_with_name() {
        let children: [&str; 0] = [];
        assert_eq!(
            render_or_placeholder("vl-style-fill", &children),
            RenderOutput::Placeholder(Placeholder {
                tag: "vl-style-fill".to_string()
            })
        );
    }

    #[test]
    fn test_children_are_handed_back() {
        let children = ["vl-style-stroke"];
        match render_or_placeholder("vl-style-box", &children) {
            RenderOutput::Children(rendered) => assert_eq!(rendered, &children),
            other => panic!("Expected child rendering, got {other:?}"),
        }
    }
}
