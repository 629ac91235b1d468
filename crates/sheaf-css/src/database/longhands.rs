//! Longhand grammar table.
//!
//! Each row gives a longhand's initial value text, whether it inherits, the
//! kinds of typed value it takes, and its keywords. Shorthand decomposers
//! validate single units against these rows.

use super::ValueKinds;

/// One row of the longhand table.
pub(super) struct LonghandSpec {
    pub name: &'static str,
    pub initial: &'static str,
    pub inherited: bool,
    pub kinds: ValueKinds,
    pub identifiers: &'static [&'static str],
    pub functions: &'static [&'static str],
}

const fn longhand(
    name: &'static str,
    initial: &'static str,
    kinds: ValueKinds,
    identifiers: &'static [&'static str],
) -> LonghandSpec {
    LonghandSpec {
        name,
        initial,
        inherited: false,
        kinds,
        identifiers,
        functions: &[],
    }
}

impl LonghandSpec {
    const fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    const fn functions(mut self, functions: &'static [&'static str]) -> Self {
        self.functions = functions;
        self
    }
}

const NONE: ValueKinds = ValueKinds::empty();
const LP: ValueKinds = ValueKinds::LENGTH_PERCENTAGE;
const LP_NN: ValueKinds = ValueKinds::LENGTH_PERCENTAGE.union(ValueKinds::NON_NEGATIVE);
const LENGTH_NN: ValueKinds = ValueKinds::LENGTH.union(ValueKinds::NON_NEGATIVE);
const COLOR: ValueKinds = ValueKinds::COLOR;
const IMAGE: ValueKinds = ValueKinds::IMAGE;
const TIME: ValueKinds = ValueKinds::TIME;
const NUMBER_NN: ValueKinds = ValueKinds::NUMBER.union(ValueKinds::NON_NEGATIVE);

/// [§ 4.3 Line Widths](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-width)
const LINE_WIDTH: &[&str] = &["thin", "medium", "thick"];

/// [§ 4.2 Line Patterns](https://www.w3.org/TR/css-backgrounds-3/#typedef-line-style)
const LINE_STYLE: &[&str] = &[
    "none", "hidden", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

/// [CSS UI 4 § 3.3](https://www.w3.org/TR/css-ui-4/#outline-style)
///
/// "The outline-style property accepts the same values as border-style,
/// except that hidden is not a legal outline style."
const OUTLINE_STYLE: &[&str] = &[
    "auto", "none", "dotted", "dashed", "solid", "double", "groove", "ridge", "inset", "outset",
];

const OVERFLOW: &[&str] = &["visible", "hidden", "clip", "scroll", "auto"];
const OVERSCROLL: &[&str] = &["auto", "contain", "none"];

// [CSS Box Alignment 3](https://www.w3.org/TR/css-align-3/)
// Single-keyword forms only. `first`/`last`, `safe`/`unsafe` and `legacy`
// prefixes are handled by the pair decomposer.
const ALIGN_CONTENT: &[&str] = &[
    "normal", "baseline", "space-between", "space-around", "space-evenly", "stretch", "center",
    "start", "end", "flex-start", "flex-end",
];
const JUSTIFY_CONTENT: &[&str] = &[
    "normal", "space-between", "space-around", "space-evenly", "stretch", "center", "start",
    "end", "flex-start", "flex-end", "left", "right",
];
const ALIGN_ITEMS: &[&str] = &[
    "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end",
];
const JUSTIFY_ITEMS: &[&str] = &[
    "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end", "left", "right", "legacy",
];
const ALIGN_SELF: &[&str] = &[
    "auto", "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end",
];
const JUSTIFY_SELF: &[&str] = &[
    "auto", "normal", "stretch", "baseline", "center", "start", "end", "self-start", "self-end",
    "flex-start", "flex-end", "left", "right",
];

/// [§ 2.1 Image values](https://www.w3.org/TR/css-images-3/#image-values)
pub(super) const IMAGE_FUNCTIONS: &[&str] = &[
    "linear-gradient",
    "radial-gradient",
    "conic-gradient",
    "repeating-linear-gradient",
    "repeating-radial-gradient",
    "repeating-conic-gradient",
    "image",
    "image-set",
    "cross-fade",
    "element",
    "paint",
    "-webkit-gradient",
    "-webkit-linear-gradient",
    "-webkit-radial-gradient",
];

const BOX: &[&str] = &["border-box", "padding-box", "content-box"];
const CLIP_BOX: &[&str] = &["border-box", "padding-box", "content-box", "text"];

const FONT_STYLE: &[&str] = &["normal", "italic", "oblique"];
const FONT_VARIANT_CAPS: &[&str] = &[
    "normal", "small-caps", "all-small-caps", "petite-caps", "all-petite-caps", "unicase",
    "titling-caps",
];
const FONT_WEIGHT: &[&str] = &["normal", "bold", "bolder", "lighter"];
const FONT_STRETCH: &[&str] = &[
    "normal", "ultra-condensed", "extra-condensed", "condensed", "semi-condensed",
    "semi-expanded", "expanded", "extra-expanded", "ultra-expanded",
];
const FONT_SIZE: &[&str] = &[
    "xx-small", "x-small", "small", "medium", "large", "x-large", "xx-large", "xxx-large",
    "larger", "smaller", "math",
];
const GENERIC_FAMILIES: &[&str] = &[
    "serif", "sans-serif", "monospace", "cursive", "fantasy", "system-ui", "ui-serif",
    "ui-sans-serif", "ui-monospace", "ui-rounded", "math", "emoji", "fangsong",
];
const FONT_VARIANT_LIGATURES: &[&str] = &[
    "normal",
    "none",
    "common-ligatures",
    "no-common-ligatures",
    "discretionary-ligatures",
    "no-discretionary-ligatures",
    "historical-ligatures",
    "no-historical-ligatures",
    "contextual",
    "no-contextual",
];
const FONT_VARIANT_NUMERIC: &[&str] = &[
    "normal",
    "lining-nums",
    "oldstyle-nums",
    "proportional-nums",
    "tabular-nums",
    "diagonal-fractions",
    "stacked-fractions",
    "ordinal",
    "slashed-zero",
];
const FONT_VARIANT_EAST_ASIAN: &[&str] = &[
    "normal",
    "jis78",
    "jis83",
    "jis90",
    "jis04",
    "simplified",
    "traditional",
    "full-width",
    "proportional-width",
    "ruby",
];
const FONT_VARIANT_ALTERNATE_FUNCTIONS: &[&str] = &[
    "stylistic",
    "styleset",
    "character-variant",
    "swash",
    "ornaments",
    "annotation",
];

/// [CSS Counter Styles 3 § 7](https://www.w3.org/TR/css-counter-styles-3/#predefined-counters)
const LIST_STYLE_TYPE: &[&str] = &[
    "none",
    "disc",
    "circle",
    "square",
    "disclosure-open",
    "disclosure-closed",
    "decimal",
    "decimal-leading-zero",
    "lower-roman",
    "upper-roman",
    "lower-greek",
    "lower-alpha",
    "lower-latin",
    "upper-alpha",
    "upper-latin",
    "armenian",
    "georgian",
    "hebrew",
    "hiragana",
    "katakana",
    "cjk-decimal",
];

const FLEX_BASIS: &[&str] = &["auto", "content", "max-content", "min-content", "fit-content"];
const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
const FLEX_WRAP: &[&str] = &["nowrap", "wrap", "wrap-reverse"];

const GRID_LINE: &[&str] = &["auto", "span"];
const TRACK_LIST: &[&str] = &["none", "auto", "min-content", "max-content", "subgrid", "masonry"];
const TRACK_SIZE: &[&str] = &["auto", "min-content", "max-content"];
const TRACK_FUNCTIONS: &[&str] = &["repeat", "minmax", "fit-content"];

/// [CSS Easing 1 § 2](https://www.w3.org/TR/css-easing-1/#easing-functions)
pub(super) const TIMING_KEYWORDS: &[&str] = &[
    "ease",
    "linear",
    "ease-in",
    "ease-out",
    "ease-in-out",
    "step-start",
    "step-end",
];
const TIMING_FUNCTIONS: &[&str] = &["cubic-bezier", "steps", "linear"];
const ANIMATION_DIRECTION: &[&str] = &["normal", "reverse", "alternate", "alternate-reverse"];
const ANIMATION_FILL_MODE: &[&str] = &["none", "forwards", "backwards", "both"];
const ANIMATION_PLAY_STATE: &[&str] = &["running", "paused"];

const TEXT_DECORATION_LINE: &[&str] = &["none", "underline", "overline", "line-through", "blink"];
const TEXT_DECORATION_STYLE: &[&str] = &["solid", "double", "dotted", "dashed", "wavy"];
const TEXT_EMPHASIS_STYLE: &[&str] = &[
    "none", "filled", "open", "dot", "circle", "double-circle", "triangle", "sesame",
];

pub(super) const LONGHANDS: &[LonghandSpec] = &[
    // [§ 8.3 Margin properties](https://www.w3.org/TR/CSS21/box.html#margin-properties)
    longhand("margin-top", "0", LP, &["auto"]),
    longhand("margin-right", "0", LP, &["auto"]),
    longhand("margin-bottom", "0", LP, &["auto"]),
    longhand("margin-left", "0", LP, &["auto"]),
    longhand("margin-block-start", "0", LP, &["auto"]),
    longhand("margin-block-end", "0", LP, &["auto"]),
    longhand("margin-inline-start", "0", LP, &["auto"]),
    longhand("margin-inline-end", "0", LP, &["auto"]),
    // [§ 8.4 Padding properties](https://www.w3.org/TR/CSS21/box.html#padding-properties)
    longhand("padding-top", "0", LP_NN, &[]),
    longhand("padding-right", "0", LP_NN, &[]),
    longhand("padding-bottom", "0", LP_NN, &[]),
    longhand("padding-left", "0", LP_NN, &[]),
    longhand("padding-block-start", "0", LP_NN, &[]),
    longhand("padding-block-end", "0", LP_NN, &[]),
    longhand("padding-inline-start", "0", LP_NN, &[]),
    longhand("padding-inline-end", "0", LP_NN, &[]),
    // [§ 4 Borders](https://www.w3.org/TR/css-backgrounds-3/#borders)
    longhand("border-top-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("border-right-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("border-bottom-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("border-left-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("border-top-style", "none", NONE, LINE_STYLE),
    longhand("border-right-style", "none", NONE, LINE_STYLE),
    longhand("border-bottom-style", "none", NONE, LINE_STYLE),
    longhand("border-left-style", "none", NONE, LINE_STYLE),
    longhand("border-top-color", "currentcolor", COLOR, &[]),
    longhand("border-right-color", "currentcolor", COLOR, &[]),
    longhand("border-bottom-color", "currentcolor", COLOR, &[]),
    longhand("border-left-color", "currentcolor", COLOR, &[]),
    // [CSS Position 3 § 3.1](https://www.w3.org/TR/css-position-3/#insets)
    longhand("top", "auto", LP, &["auto"]),
    longhand("right", "auto", LP, &["auto"]),
    longhand("bottom", "auto", LP, &["auto"]),
    longhand("left", "auto", LP, &["auto"]),
    // [CSS Overflow 3 § 3](https://www.w3.org/TR/css-overflow-3/#overflow-properties)
    longhand("overflow-x", "visible", NONE, OVERFLOW),
    longhand("overflow-y", "visible", NONE, OVERFLOW),
    longhand("overscroll-behavior-x", "auto", NONE, OVERSCROLL),
    longhand("overscroll-behavior-y", "auto", NONE, OVERSCROLL),
    // [CSS Box Alignment 3](https://www.w3.org/TR/css-align-3/)
    longhand("align-content", "normal", NONE, ALIGN_CONTENT),
    longhand("justify-content", "normal", NONE, JUSTIFY_CONTENT),
    longhand("align-items", "normal", NONE, ALIGN_ITEMS),
    longhand("justify-items", "legacy", NONE, JUSTIFY_ITEMS),
    longhand("align-self", "auto", NONE, ALIGN_SELF),
    longhand("justify-self", "auto", NONE, JUSTIFY_SELF),
    longhand("row-gap", "normal", LP_NN, &["normal"]),
    longhand("column-gap", "normal", LP_NN, &["normal"]),
    // [CSS UI 4 § 3](https://www.w3.org/TR/css-ui-4/#outline-props)
    longhand("outline-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("outline-style", "none", NONE, OUTLINE_STYLE),
    longhand("outline-color", "currentcolor", COLOR, &["auto", "invert"]),
    // [CSS Multi-column 1 § 4](https://www.w3.org/TR/css-multicol-1/#column-gaps-and-rules)
    longhand("column-rule-width", "medium", LENGTH_NN, LINE_WIDTH),
    longhand("column-rule-style", "none", NONE, LINE_STYLE),
    longhand("column-rule-color", "currentcolor", COLOR, &[]),
    // [§ 5 Rounded Corners](https://www.w3.org/TR/css-backgrounds-3/#corners)
    longhand("border-top-left-radius", "0", LP_NN, &[]),
    longhand("border-top-right-radius", "0", LP_NN, &[]),
    longhand("border-bottom-right-radius", "0", LP_NN, &[]),
    longhand("border-bottom-left-radius", "0", LP_NN, &[]),
    // [§ 6 Border Images](https://www.w3.org/TR/css-backgrounds-3/#border-images)
    longhand("border-image-source", "none", IMAGE, &["none"]),
    longhand(
        "border-image-slice",
        "100%",
        ValueKinds::NUMBER
            .union(ValueKinds::PERCENTAGE)
            .union(ValueKinds::NON_NEGATIVE),
        &["fill"],
    ),
    longhand(
        "border-image-width",
        "1",
        LP_NN.union(ValueKinds::NUMBER),
        &["auto"],
    ),
    longhand(
        "border-image-outset",
        "0",
        LENGTH_NN.union(ValueKinds::NUMBER),
        &[],
    ),
    longhand(
        "border-image-repeat",
        "stretch",
        NONE,
        &["stretch", "repeat", "round", "space"],
    ),
    // [§ 3 Backgrounds](https://www.w3.org/TR/css-backgrounds-3/#backgrounds)
    longhand("background-image", "none", IMAGE, &["none"]),
    longhand(
        "background-position",
        "0% 0%",
        LP,
        &["left", "center", "right", "top", "bottom"],
    ),
    longhand("background-size", "auto", LP_NN, &["auto", "cover", "contain"]),
    longhand(
        "background-repeat",
        "repeat",
        NONE,
        &["repeat-x", "repeat-y", "repeat", "space", "round", "no-repeat"],
    ),
    longhand("background-attachment", "scroll", NONE, &["scroll", "fixed", "local"]),
    longhand("background-origin", "padding-box", NONE, BOX),
    longhand("background-clip", "border-box", NONE, CLIP_BOX),
    longhand("background-color", "transparent", COLOR, &[]),
    // [CSS Fonts 4 § 2-7](https://www.w3.org/TR/css-fonts-4/)
    longhand("font-style", "normal", NONE, FONT_STYLE).inherited(),
    longhand("font-variant-caps", "normal", NONE, FONT_VARIANT_CAPS).inherited(),
    longhand("font-weight", "normal", NUMBER_NN, FONT_WEIGHT).inherited(),
    longhand(
        "font-stretch",
        "normal",
        ValueKinds::PERCENTAGE.union(ValueKinds::NON_NEGATIVE),
        FONT_STRETCH,
    )
    .inherited(),
    longhand("font-size", "medium", LP_NN, FONT_SIZE).inherited(),
    longhand(
        "line-height",
        "normal",
        LP_NN.union(ValueKinds::NUMBER),
        &["normal"],
    )
    .inherited(),
    longhand(
        "font-family",
        "serif",
        ValueKinds::STRING.union(ValueKinds::CUSTOM_IDENT),
        GENERIC_FAMILIES,
    )
    .inherited(),
    longhand("font-size-adjust", "none", NUMBER_NN, &["none", "from-font"]).inherited(),
    longhand("font-kerning", "auto", NONE, &["auto", "normal", "none"]).inherited(),
    longhand("font-variant-ligatures", "normal", NONE, FONT_VARIANT_LIGATURES).inherited(),
    longhand("font-variant-position", "normal", NONE, &["normal", "sub", "super"]).inherited(),
    longhand("font-variant-numeric", "normal", NONE, FONT_VARIANT_NUMERIC).inherited(),
    longhand(
        "font-variant-alternates",
        "normal",
        NONE,
        &["normal", "historical-forms"],
    )
    .functions(FONT_VARIANT_ALTERNATE_FUNCTIONS)
    .inherited(),
    longhand("font-variant-east-asian", "normal", NONE, FONT_VARIANT_EAST_ASIAN).inherited(),
    longhand("font-feature-settings", "normal", ValueKinds::STRING, &["normal"]).inherited(),
    longhand("font-variation-settings", "normal", ValueKinds::STRING, &["normal"]).inherited(),
    longhand("font-optical-sizing", "auto", NONE, &["auto", "none"]).inherited(),
    longhand("font-language-override", "normal", ValueKinds::STRING, &["normal"]).inherited(),
    // [CSS Lists 3 § 3](https://www.w3.org/TR/css-lists-3/#list-style-property)
    longhand("list-style-position", "outside", NONE, &["inside", "outside"]).inherited(),
    longhand("list-style-image", "none", IMAGE, &["none"]).inherited(),
    longhand(
        "list-style-type",
        "disc",
        ValueKinds::STRING.union(ValueKinds::CUSTOM_IDENT),
        LIST_STYLE_TYPE,
    )
    .functions(&["symbols"])
    .inherited(),
    // [CSS Flexbox 1 § 7](https://www.w3.org/TR/css-flexbox-1/#flexibility)
    longhand("flex-grow", "0", NUMBER_NN, &[]),
    longhand("flex-shrink", "1", NUMBER_NN, &[]),
    longhand("flex-basis", "auto", LP_NN, FLEX_BASIS),
    longhand("flex-direction", "row", NONE, FLEX_DIRECTION),
    longhand("flex-wrap", "nowrap", NONE, FLEX_WRAP),
    // [CSS Grid 2 § 8.3](https://www.w3.org/TR/css-grid-2/#line-placement)
    longhand(
        "grid-row-start",
        "auto",
        ValueKinds::INTEGER.union(ValueKinds::CUSTOM_IDENT),
        GRID_LINE,
    ),
    longhand(
        "grid-row-end",
        "auto",
        ValueKinds::INTEGER.union(ValueKinds::CUSTOM_IDENT),
        GRID_LINE,
    ),
    longhand(
        "grid-column-start",
        "auto",
        ValueKinds::INTEGER.union(ValueKinds::CUSTOM_IDENT),
        GRID_LINE,
    ),
    longhand(
        "grid-column-end",
        "auto",
        ValueKinds::INTEGER.union(ValueKinds::CUSTOM_IDENT),
        GRID_LINE,
    ),
    // [CSS Grid 2 § 7](https://www.w3.org/TR/css-grid-2/#grid-definition)
    longhand(
        "grid-template-rows",
        "none",
        LP_NN.union(ValueKinds::FLEX),
        TRACK_LIST,
    )
    .functions(TRACK_FUNCTIONS),
    longhand(
        "grid-template-columns",
        "none",
        LP_NN.union(ValueKinds::FLEX),
        TRACK_LIST,
    )
    .functions(TRACK_FUNCTIONS),
    longhand("grid-template-areas", "none", ValueKinds::STRING, &["none"]),
    longhand(
        "grid-auto-rows",
        "auto",
        LP_NN.union(ValueKinds::FLEX),
        TRACK_SIZE,
    )
    .functions(TRACK_FUNCTIONS),
    longhand(
        "grid-auto-columns",
        "auto",
        LP_NN.union(ValueKinds::FLEX),
        TRACK_SIZE,
    )
    .functions(TRACK_FUNCTIONS),
    longhand("grid-auto-flow", "row", NONE, &["row", "column", "dense"]),
    // [CSS Multi-column 1 § 3](https://www.w3.org/TR/css-multicol-1/#the-number-and-width-of-columns)
    longhand("column-width", "auto", LENGTH_NN, &["auto"]),
    longhand(
        "column-count",
        "auto",
        ValueKinds::INTEGER.union(ValueKinds::NON_NEGATIVE),
        &["auto"],
    ),
    // [CSS Animations 1 § 3](https://www.w3.org/TR/css-animations-1/#animation-name)
    longhand(
        "animation-name",
        "none",
        ValueKinds::CUSTOM_IDENT.union(ValueKinds::STRING),
        &["none"],
    ),
    longhand(
        "animation-duration",
        "0s",
        TIME.union(ValueKinds::NON_NEGATIVE),
        &[],
    ),
    longhand("animation-timing-function", "ease", NONE, TIMING_KEYWORDS)
        .functions(TIMING_FUNCTIONS),
    longhand("animation-delay", "0s", TIME, &[]),
    longhand("animation-iteration-count", "1", NUMBER_NN, &["infinite"]),
    longhand("animation-direction", "normal", NONE, ANIMATION_DIRECTION),
    longhand("animation-fill-mode", "none", NONE, ANIMATION_FILL_MODE),
    longhand("animation-play-state", "running", NONE, ANIMATION_PLAY_STATE),
    // [CSS Transitions 1 § 2](https://www.w3.org/TR/css-transitions-1/#transitions)
    longhand(
        "transition-property",
        "all",
        ValueKinds::CUSTOM_IDENT,
        &["all", "none"],
    ),
    longhand(
        "transition-duration",
        "0s",
        TIME.union(ValueKinds::NON_NEGATIVE),
        &[],
    ),
    longhand("transition-timing-function", "ease", NONE, TIMING_KEYWORDS)
        .functions(TIMING_FUNCTIONS),
    longhand("transition-delay", "0s", TIME, &[]),
    // [CSS Text Decoration 4 § 2](https://www.w3.org/TR/css-text-decor-4/#line-decoration)
    longhand("text-decoration-line", "none", NONE, TEXT_DECORATION_LINE),
    longhand("text-decoration-style", "solid", NONE, TEXT_DECORATION_STYLE),
    longhand("text-decoration-color", "currentcolor", COLOR, &[]),
    longhand("text-decoration-thickness", "auto", LP, &["auto", "from-font"]),
    // [CSS Text Decoration 4 § 3](https://www.w3.org/TR/css-text-decor-4/#emphasis-marks)
    longhand(
        "text-emphasis-style",
        "none",
        ValueKinds::STRING,
        TEXT_EMPHASIS_STYLE,
    )
    .inherited(),
    longhand("text-emphasis-color", "currentcolor", COLOR, &[]).inherited(),
];
