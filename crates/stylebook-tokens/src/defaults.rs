//! Built-in "Vibe Coder" catalogue.

use crate::a11y::{AccessibilityRule, Threshold, LARGE_TEXT_CONTRAST, TEXT_CONTRAST};
use crate::catalogue::{Brand, Catalogue, Guidelines, Layout, Radii, Typography};
use crate::color::{ColorToken, HexColor, NeutralStep};
use crate::elevation::{ElevationTier, Radius, Shadow};
use crate::motion::{Easing, Motion, MotionTiming};
use crate::scale::{Scale, Span};

fn color(name: &str, hex: &'static str) -> ColorToken {
    ColorToken {
        name: name.to_string(),
        hex: HexColor::builtin(hex),
    }
}

fn neutral(step: u16, hex: &'static str) -> NeutralStep {
    NeutralStep {
        step,
        hex: HexColor::builtin(hex),
    }
}

fn scale(name: &str, steps: &[u32]) -> Scale {
    Scale::new(name, steps.to_vec()).expect("built-in scale is strictly increasing")
}

impl Default for Catalogue {
    fn default() -> Self {
        Self {
            spacing: scale("spacing", &[4, 8, 12, 16, 20, 24, 32, 40, 48, 64]),
            brand: Brand::default(),
            colors: vec![
                color("Primary", "#2563EB"),
                color("Secondary", "#7C3AED"),
                color("Accent", "#06B6D4"),
                color("Success", "#10B981"),
                color("Warning", "#F59E0B"),
                color("Danger", "#EF4444"),
            ],
            neutrals: vec![
                neutral(900, "#0F172A"),
                neutral(700, "#334155"),
                neutral(500, "#64748B"),
                neutral(300, "#CBD5E1"),
                neutral(100, "#F1F5F9"),
            ],
            typography: Typography::default(),
            layout: Layout::default(),
            elevation: vec![
                ElevationTier::new("Subtle", Radius::Md, Shadow::Sm),
                ElevationTier::new("Mid", Radius::Lg, Shadow::Md),
                ElevationTier::new("High", Radius::Xl, Shadow::Xl),
            ],
            motion: Motion::default(),
            accessibility: vec![
                AccessibilityRule::new(
                    TEXT_CONTRAST,
                    "Color contrast",
                    Threshold::Ratio(4.5),
                    "text ≤ 18pt/24px",
                ),
                AccessibilityRule::new(
                    LARGE_TEXT_CONTRAST,
                    "Color contrast (large text)",
                    Threshold::Ratio(3.0),
                    "text larger than 18pt/24px",
                ),
                AccessibilityRule::new(
                    "touch-target",
                    "Touch targets",
                    Threshold::Area(44, 44),
                    "buttons, links and form controls",
                ),
                AccessibilityRule::new(
                    "base-font-size",
                    "Base font size",
                    Threshold::Pixels(16),
                    "body copy",
                ),
                AccessibilityRule::new(
                    "line-height",
                    "Line height",
                    Threshold::Factor(1.5),
                    "body copy",
                ),
            ],
            guidelines: Guidelines::default(),
        }
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: "Vibe Coder".to_string(),
            system_name: "Vibe Coder Design System".to_string(),
            headline: "Futuristic, vibrant, and accessible UI for builders".to_string(),
            tagline: "A cohesive design language for fast, consistent, and beautiful product experiences."
                .to_string(),
        }
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading_font: "Inter/Geist".to_string(),
            body_font: "Inter".to_string(),
            mono_font: "Geist Mono".to_string(),
            weights: vec![400, 500, 600, 700, 800],
            scale: scale("typography.scale", &[12, 14, 16, 18, 20, 24, 30, 36, 48, 60]),
            body_line_height: [1.6, 1.8],
            line_length: Span::new(45, 75),
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            columns: 12,
            containers: scale("layout.containers", &[640, 768, 1024, 1280, 1536]),
            gutter: Span::new(16, 24),
            section_padding: Span::new(64, 96),
            radii: Radii {
                compact: 8,
                default: 12,
                prominent: 16,
            },
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            active_scale: 0.98,
            entrance_translate: Span::new(8, 16),
            reveal_translate: Span::new(12, 24),
            hover_scale: Span::new(1, 2),
            timings: vec![
                MotionTiming::new(
                    "micro",
                    Span::exactly(150),
                    Easing::Spring,
                    "playful micro-interactions",
                ),
                MotionTiming::new(
                    "ui",
                    Span::new(250, 350),
                    Easing::EaseInOut,
                    "state changes inside a view",
                ),
                MotionTiming::new(
                    "entrance",
                    Span::new(400, 600),
                    Easing::EaseOut,
                    "fade + translate in",
                ),
                MotionTiming::new(
                    "exit",
                    Span::new(250, 350),
                    Easing::EaseIn,
                    "fade + translate out",
                ),
            ],
        }
    }
}

impl Default for Guidelines {
    fn default() -> Self {
        Self {
            color_strategy: "Vibrant blues and purples with iridescent accents. Neutrals keep \
                content readable and professional. Semantic colors for clear feedback."
                .to_string(),
            iconography: "- Use simple, geometric icon sets with 2px strokes; rounded caps\n\
                - Imagery: futuristic, iridescent, tech-forward; avoid clutter\n\
                - Illustrations: gradients, glass, subtle glow accents\n"
                .to_string(),
            elevation: "Keep elevation meaningful and minimal.".to_string(),
            buttons: "Primary drives the main action. Secondary is neutral. Ghost is \
                low-emphasis. Include proper hover/focus/disabled states."
                .to_string(),
            button_states: "- Hover: +6–10% luminance; Focus: visible 2px ring\n\
                - Active: 0.98 scale; Disabled: 40–50% contrast\n"
                .to_string(),
            forms: "States: default, focus, error (`ring-red-500`), success \
                (`ring-green-500`), disabled (`bg-slate-100`)."
                .to_string(),
            modals: "Use for focused tasks. Dim background with 20–40% overlay. Trap \
                focus; close on ESC and outside click."
                .to_string(),
            containers: "Use max-width containers (lg to 6xl), 64–96px vertical padding, \
                and consistent gutters. Prefer white or subtle tinted backgrounds with 12px \
                radius and soft rings."
                .to_string(),
            theme: "Futuristic, vibrant, trustworthy. Iridescent accents and glass \
                morphism cues evoke modern fintech and developer tooling."
                .to_string(),
            motifs: "- Holographic cards & glowing verification marks\n\
                - Soft gradients: blue → purple with cyan highlights\n\
                - Rounded rectangles, layered depth, subtle noise\n"
                .to_string(),
            voice: "- Confident, concise, helpful\n\
                - Jargon-light, developer-friendly\n\
                - Encourage action; celebrate progress\n"
                .to_string(),
            logo_usage: "- Minimum clear space: 1x logomark width\n\
                - Prefer monochrome on busy backgrounds\n\
                - Avoid warping, shadows, or low contrast placements\n"
                .to_string(),
            brand_do: "Keep consistent padding, radius, and elevation.".to_string(),
            brand_dont: "Mix too many accent colors or overly sharp corners.".to_string(),
            motion: "Ease-out for entrance, ease-in for exit, spring for playful \
                micro-interactions. Animate `transform` and `opacity`; keep layout stable."
                .to_string(),
            accessibility: "- Keyboard: visible focus rings, logical tab order, ESC to close \
                dialogs\n\
                - Use semantic HTML and ARIA roles where necessary\n"
                .to_string(),
            documentation: "Use this page as the single source of truth. Organize sections \
                with clear headings and examples. Each component should list visual spec, \
                interaction rules, states, responsive behavior, and variants.\n\n\
                - Tables/lists for token scales\n\
                - Embedded live examples next to rules\n\
                - Code snippets optional; focus on behavior and specs\n"
                .to_string(),
        }
    }
}
