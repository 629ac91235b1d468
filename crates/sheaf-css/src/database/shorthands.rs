//! Shorthand table: each shorthand's family and longhands.

use crate::shorthand::ShorthandKind;

/// One row of the shorthand table.
pub(super) struct ShorthandSpec {
    pub name: &'static str,
    pub kind: ShorthandKind,
    pub longhands: &'static [&'static str],
    pub reset_only: &'static [&'static str],
}

const fn shorthand(
    name: &'static str,
    kind: ShorthandKind,
    longhands: &'static [&'static str],
) -> ShorthandSpec {
    ShorthandSpec {
        name,
        kind,
        longhands,
        reset_only: &[],
    }
}

impl ShorthandSpec {
    const fn resets(mut self, reset_only: &'static [&'static str]) -> Self {
        self.reset_only = reset_only;
        self
    }
}

const BORDER_IMAGE: &[&str] = &[
    "border-image-source",
    "border-image-slice",
    "border-image-width",
    "border-image-outset",
    "border-image-repeat",
];

pub(super) const SHORTHANDS: &[ShorthandSpec] = &[
    shorthand(
        "margin",
        ShorthandKind::Box,
        &["margin-top", "margin-right", "margin-bottom", "margin-left"],
    ),
    shorthand(
        "padding",
        ShorthandKind::Box,
        &["padding-top", "padding-right", "padding-bottom", "padding-left"],
    ),
    shorthand(
        "border-width",
        ShorthandKind::Box,
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
        ],
    ),
    shorthand(
        "border-style",
        ShorthandKind::Box,
        &[
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
        ],
    ),
    shorthand(
        "border-color",
        ShorthandKind::Box,
        &[
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    ),
    shorthand(
        "inset",
        ShorthandKind::Box,
        &["top", "right", "bottom", "left"],
    ),
    shorthand(
        "overflow",
        ShorthandKind::Sequence,
        &["overflow-x", "overflow-y"],
    ),
    shorthand(
        "overscroll-behavior",
        ShorthandKind::Sequence,
        &["overscroll-behavior-x", "overscroll-behavior-y"],
    ),
    shorthand(
        "margin-block",
        ShorthandKind::Sequence,
        &["margin-block-start", "margin-block-end"],
    ),
    shorthand(
        "margin-inline",
        ShorthandKind::Sequence,
        &["margin-inline-start", "margin-inline-end"],
    ),
    shorthand(
        "padding-block",
        ShorthandKind::Sequence,
        &["padding-block-start", "padding-block-end"],
    ),
    shorthand(
        "padding-inline",
        ShorthandKind::Sequence,
        &["padding-inline-start", "padding-inline-end"],
    ),
    shorthand(
        "place-content",
        ShorthandKind::Pair,
        &["align-content", "justify-content"],
    ),
    shorthand(
        "place-items",
        ShorthandKind::Pair,
        &["align-items", "justify-items"],
    ),
    shorthand(
        "place-self",
        ShorthandKind::Pair,
        &["align-self", "justify-self"],
    ),
    shorthand("gap", ShorthandKind::Pair, &["row-gap", "column-gap"]),
    shorthand(
        "border",
        ShorthandKind::Border,
        &[
            "border-top-width",
            "border-right-width",
            "border-bottom-width",
            "border-left-width",
            "border-top-style",
            "border-right-style",
            "border-bottom-style",
            "border-left-style",
            "border-top-color",
            "border-right-color",
            "border-bottom-color",
            "border-left-color",
        ],
    )
    .resets(BORDER_IMAGE),
    shorthand(
        "border-top",
        ShorthandKind::BorderSide,
        &["border-top-width", "border-top-style", "border-top-color"],
    ),
    shorthand(
        "border-right",
        ShorthandKind::BorderSide,
        &["border-right-width", "border-right-style", "border-right-color"],
    ),
    shorthand(
        "border-bottom",
        ShorthandKind::BorderSide,
        &["border-bottom-width", "border-bottom-style", "border-bottom-color"],
    ),
    shorthand(
        "border-left",
        ShorthandKind::BorderSide,
        &["border-left-width", "border-left-style", "border-left-color"],
    ),
    shorthand(
        "outline",
        ShorthandKind::BorderSide,
        &["outline-width", "outline-style", "outline-color"],
    ),
    shorthand(
        "column-rule",
        ShorthandKind::BorderSide,
        &["column-rule-width", "column-rule-style", "column-rule-color"],
    ),
    shorthand(
        "border-radius",
        ShorthandKind::BorderRadius,
        &[
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ],
    ),
    shorthand("border-image", ShorthandKind::BorderImage, BORDER_IMAGE),
    shorthand(
        "background",
        ShorthandKind::Background,
        &[
            "background-image",
            "background-position",
            "background-size",
            "background-repeat",
            "background-attachment",
            "background-origin",
            "background-clip",
            "background-color",
        ],
    ),
    shorthand(
        "font",
        ShorthandKind::Font,
        &[
            "font-style",
            "font-variant-caps",
            "font-weight",
            "font-stretch",
            "font-size",
            "line-height",
            "font-family",
        ],
    )
    .resets(&[
        "font-size-adjust",
        "font-kerning",
        "font-variant-ligatures",
        "font-variant-position",
        "font-variant-numeric",
        "font-variant-alternates",
        "font-variant-east-asian",
        "font-feature-settings",
        "font-variation-settings",
        "font-optical-sizing",
        "font-language-override",
    ]),
    shorthand(
        "font-variant",
        ShorthandKind::FontVariant,
        &[
            "font-variant-ligatures",
            "font-variant-caps",
            "font-variant-alternates",
            "font-variant-numeric",
            "font-variant-east-asian",
            "font-variant-position",
        ],
    ),
    shorthand(
        "list-style",
        ShorthandKind::ListStyle,
        &["list-style-position", "list-style-image", "list-style-type"],
    ),
    shorthand(
        "flex",
        ShorthandKind::Flex,
        &["flex-grow", "flex-shrink", "flex-basis"],
    ),
    shorthand(
        "flex-flow",
        ShorthandKind::Unordered,
        &["flex-direction", "flex-wrap"],
    ),
    shorthand(
        "grid-row",
        ShorthandKind::GridPlacement,
        &["grid-row-start", "grid-row-end"],
    ),
    shorthand(
        "grid-column",
        ShorthandKind::GridPlacement,
        &["grid-column-start", "grid-column-end"],
    ),
    shorthand(
        "grid-area",
        ShorthandKind::GridPlacement,
        &[
            "grid-row-start",
            "grid-column-start",
            "grid-row-end",
            "grid-column-end",
        ],
    ),
    shorthand(
        "grid-template",
        ShorthandKind::GridTemplate,
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
        ],
    ),
    shorthand(
        "grid",
        ShorthandKind::Grid,
        &[
            "grid-template-rows",
            "grid-template-columns",
            "grid-template-areas",
            "grid-auto-rows",
            "grid-auto-columns",
            "grid-auto-flow",
        ],
    ),
    shorthand(
        "columns",
        ShorthandKind::Columns,
        &["column-width", "column-count"],
    ),
    shorthand(
        "animation",
        ShorthandKind::Animation,
        &[
            "animation-name",
            "animation-duration",
            "animation-timing-function",
            "animation-delay",
            "animation-iteration-count",
            "animation-direction",
            "animation-fill-mode",
            "animation-play-state",
        ],
    ),
    shorthand(
        "transition",
        ShorthandKind::Transition,
        &[
            "transition-property",
            "transition-duration",
            "transition-timing-function",
            "transition-delay",
        ],
    ),
    shorthand(
        "text-decoration",
        ShorthandKind::Unordered,
        &[
            "text-decoration-line",
            "text-decoration-style",
            "text-decoration-color",
            "text-decoration-thickness",
        ],
    ),
    shorthand(
        "text-emphasis",
        ShorthandKind::Unordered,
        &["text-emphasis-style", "text-emphasis-color"],
    ),
];

/// Order in which serialization tries shorthands. Wider shorthands come
/// before the narrower ones that overlap them.
pub(super) const SERIALIZATION_ORDER: &[&str] = &[
    "font",
    "font-variant",
    "background",
    "border",
    "border-width",
    "border-style",
    "border-color",
    "border-top",
    "border-right",
    "border-bottom",
    "border-left",
    "border-image",
    "border-radius",
    "outline",
    "margin",
    "padding",
    "inset",
    "margin-block",
    "margin-inline",
    "padding-block",
    "padding-inline",
    "overflow",
    "overscroll-behavior",
    "place-content",
    "place-items",
    "place-self",
    "gap",
    "list-style",
    "flex",
    "flex-flow",
    "grid",
    "grid-template",
    "grid-area",
    "grid-row",
    "grid-column",
    "columns",
    "column-rule",
    "animation",
    "transition",
    "text-decoration",
    "text-emphasis",
];
