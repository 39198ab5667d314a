use image::{Rgba, Rgba32FImage, RgbaImage};

/// Straight (non-premultiplied) RGBA8 pixel
pub type Rgba8 = [u8; 4];

/// Source-over blend of `src` onto `dst` with a uniform opacity multiplier.
///
/// The effective source alpha is `opacity * src_alpha`. Over an opaque
/// destination each colour channel becomes
/// `dst * (1 - a) + src * a`.
pub fn over(dst: Rgba8, src: Rgba8, opacity: f32) -> Rgba8 {
    // Also rejects NaN
    if !(opacity > 0.0) || src[3] == 0 {
        return dst;
    }
    let opacity = opacity.min(1.0);

    let sa = f32::from(src[3]) / 255.0 * opacity;
    let da = f32::from(dst[3]) / 255.0;
    let keep = da * (1.0 - sa);
    let out_a = sa + keep;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f32::from(src[i]) * sa + f32::from(dst[i]) * keep) / out_a;
        out[i] = to_u8(c);
    }
    out[3] = to_u8(out_a * 255.0);
    out
}

/// Blend `mark` onto `canvas` with its top-left corner at `(x, y)`.
///
/// The position may be partly or fully outside the canvas; pixels that fall
/// outside are dropped.
pub fn blend_at(canvas: &mut RgbaImage, mark: &RgbaImage, x: i64, y: i64, opacity: f32) {
    let (canvas_w, canvas_h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (mark_w, mark_h) = (i64::from(mark.width()), i64::from(mark.height()));

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + mark_w).min(canvas_w);
    let y_end = (y + mark_h).min(canvas_h);

    if x_start >= x_end || y_start >= y_end {
        return;
    }

    for cy in y_start..y_end {
        let my = (cy - y) as u32;
        for cx in x_start..x_end {
            let mx = (cx - x) as u32;
            let src = mark.get_pixel(mx, my).0;
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            dst.0 = over(dst.0, src, opacity);
        }
    }
}

/// Straight RGBA8 to premultiplied RGBA in `[0, 1]`.
///
/// Float storage keeps low-alpha colour precise through resampling.
pub fn premultiply(image: &RgbaImage) -> Rgba32FImage {
    Rgba32FImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let a = f32::from(a) / 255.0;
        let premul = |c: u8| f32::from(c) / 255.0 * a;
        Rgba([premul(r), premul(g), premul(b), a])
    })
}

/// Premultiplied float RGBA back to straight RGBA8. Zero alpha becomes
/// transparent black.
pub fn unpremultiply(image: &Rgba32FImage) -> RgbaImage {
    RgbaImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let a = a.clamp(0.0, 1.0);
        if !(a > 0.0) {
            return Rgba([0, 0, 0, 0]);
        }
        let straight = |c: f32| to_u8((c / a).clamp(0.0, 1.0) * 255.0);
        Rgba([straight(r), straight(g), straight(b), to_u8(a * 255.0)])
    })
}

fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
