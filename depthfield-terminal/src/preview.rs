/// ASCII preview of a depth field for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use image::RgbImage;
use std::io::Write;

/// Character luminosity ramp for depth (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are about twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// A depth field downsampled to terminal characters
pub struct AsciiPreview {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiPreview {
    /// Downsample `image` to at most `max_columns` columns.
    ///
    /// Each cell shows the brightest (nearest) pixel it covers, so thin
    /// features stay visible. Black background stays blank.
    pub fn from_image(image: &RgbImage, max_columns: usize) -> Self {
        let (image_width, image_height) = image.dimensions();
        if image_width == 0 || image_height == 0 {
            return Self {
                width: 0,
                height: 0,
                char_buffer: Vec::new(),
            };
        }

        let width = max_columns.clamp(1, image_width as usize);
        let cell_width = f64::from(image_width) / width as f64;
        let cell_height = cell_width * CELL_ASPECT;
        let height = ((f64::from(image_height) / cell_height).ceil() as usize).max(1);

        let mut char_buffer = Vec::with_capacity(width * height);
        for row in 0..height {
            let y0 = (row as f64 * cell_height) as u32;
            let y1 = (((row + 1) as f64 * cell_height) as u32).clamp(y0 + 1, image_height);
            for column in 0..width {
                let x0 = (column as f64 * cell_width) as u32;
                let x1 = (((column + 1) as f64 * cell_width) as u32).clamp(x0 + 1, image_width);

                let brightest = (y0..y1)
                    .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                    .map(|(x, y)| image.get_pixel(x, y)[0])
                    .max()
                    .unwrap_or(0);
                char_buffer.push(ramp_char(brightest));
            }
        }

        Self {
            width,
            height,
            char_buffer,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Preview rows as plain text.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.char_buffer
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Background maps to a blank; any drawn surface gets at least `.`.
fn ramp_char(intensity: u8) -> char {
    if intensity == 0 {
        return LUMINOSITY_RAMP[0];
    }
    let steps = LUMINOSITY_RAMP.len() - 2;
    LUMINOSITY_RAMP[1 + usize::from(intensity) * steps / 255]
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ramp_char(0), ' ');
        assert_eq!(ramp_char(5), '.');
        assert_eq!(ramp_char(255), '@');
    }

    #[test]
    fn test_downsample_keeps_brightest() {
        let mut image = RgbImage::new(4, 4);
        image.put_pixel(3, 0, Rgb([255, 255, 255]));
        image.put_pixel(0, 3, Rgb([5, 5, 5]));

        let preview = AsciiPreview::from_image(&image, 2);
        assert_eq!((preview.width(), preview.height()), (2, 1));
        assert_eq!(preview.lines().collect::<Vec<_>>(), vec![".@".to_string()]);
    }

    #[test]
    fn test_columns_capped_by_image_width() {
        let image = RgbImage::new(3, 2);
        let preview = AsciiPreview::from_image(&image, 80);
        assert_eq!(preview.width(), 3);
        assert_eq!(preview.height(), 1);
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut image = RgbImage::new(8, 8);
        image.put_pixel(4, 4, Rgb([200, 200, 200]));
        let preview = AsciiPreview::from_image(&image, 4);

        let mut out = Vec::new();
        preview.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches('\n').count(), preview.height());
        assert!(text.contains('#'));
    }
}
